use serde_core::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeSeq, de::{Visitor, SeqAccess}};
use core::marker::PhantomData;
use crate::{Optional, Relocate, Vector};


impl<T: Serialize> Serialize for Vector<T> {
    /// Serialize a `Vector` as a sequence.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de> + Relocate> Deserialize<'de> for Vector<T> {
    /// Deserialize a `Vector` from a sequence.
    ///
    /// The length hint, if any, is reserved up front; elements beyond it grow the
    /// vector as `push_back` does.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de> {
        struct VectorVisitor<T> {
            _marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de> + Relocate> Visitor<'de> for VectorVisitor<T> {
            type Value = Vector<T>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // Preallocate at most 4096 elements; longer sequences grow as they arrive.
                let mut vec = match seq.size_hint() {
                    Some(hint) => Vector::with_capacity(hint.min(4096)),
                    None => Vector::new(),
                };

                while let Some(element) = seq.next_element()? {
                    vec.push_back(element);
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(VectorVisitor {
            _marker: PhantomData,
        })
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    /// Serialize an `Optional` as an option.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        match self.as_option() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    /// Deserialize an `Optional` from an option.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de> {
        Option::<T>::deserialize(deserializer).map(Optional::from)
    }
}

impl<T: Serialize> Serialize for crate::vector::IntoIter<T> {
    /// Serialize the remaining items as a sequence.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        serializer.collect_seq(self.as_slice())
    }
}
