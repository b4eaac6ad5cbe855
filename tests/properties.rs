//! Model-based checks of `Vector` against `Vec`.

use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use advanced_vector::{Optional, Vector, relocate_by_copy};
use proptest::prelude::*;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Counts live instances; cloning panics once the budget is spent.
#[derive(Debug, PartialEq)]
struct Counted(u32);

impl Counted {
    fn new(value: u32) -> Self {
        LIVE.set(LIVE.get() + 1);
        Counted(value)
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        if let Some(left) = BUDGET.get() {
            if left == 0 {
                panic!("clone budget spent");
            }
            BUDGET.set(Some(left - 1));
        }
        Counted::new(self.0)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        LIVE.set(LIVE.get() - 1);
    }
}

relocate_by_copy!(Counted);

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(prop::sample::Index, i32),
    Erase(prop::sample::Index),
    Reserve(usize),
    Resize(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        2 => (any::<prop::sample::Index>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => any::<prop::sample::Index>().prop_map(Op::Erase),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => (0usize..64).prop_map(Op::Resize),
    ]
}

proptest! {
    #[test]
    fn push_pop_matches_model(ops in prop::collection::vec(prop::option::of(any::<i32>()), 0..200)) {
        let mut vec = Vector::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Some(v) => {
                    vec.push_back(v);
                    model.push(v);
                }
                None => {
                    prop_assert_eq!(vec.pop_back(), model.pop());
                }
            }
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn operations_match_model(ops in prop::collection::vec(op(), 0..120)) {
        let mut vec: Vector<i32> = Vector::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            let before = vec.capacity();
            match op {
                Op::Push(v) => {
                    vec.push_back(v);
                    model.push(v);
                }
                Op::Pop => {
                    prop_assert_eq!(vec.pop_back(), model.pop());
                }
                Op::Insert(at, v) => {
                    let index = at.index(model.len() + 1);
                    prop_assert_eq!(vec.insert(index, v), index);
                    model.insert(index, v);
                }
                Op::Erase(at) => {
                    if !model.is_empty() {
                        let index = at.index(model.len());
                        prop_assert_eq!(vec.erase(index), index);
                        model.remove(index);
                    }
                }
                Op::Reserve(n) => {
                    vec.reserve(n);
                    prop_assert!(vec.capacity() >= n);
                }
                Op::Resize(n) => {
                    vec.resize(n);
                    model.resize(n, 0);
                }
            }
            prop_assert!(vec.capacity() >= before);
            prop_assert!(vec.capacity() >= vec.len());
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn erase_undoes_insert(
        items in prop::collection::vec(any::<u16>(), 0..64),
        at in any::<prop::sample::Index>(),
        value in any::<u16>(),
    ) {
        let mut vec: Vector<u16> = items.iter().copied().collect();
        let index = at.index(items.len() + 1);

        prop_assert_eq!(vec.insert(index, value), index);
        prop_assert_eq!(vec.len(), items.len() + 1);
        prop_assert_eq!(vec[index], value);
        prop_assert_eq!(&vec[..index], &items[..index]);
        prop_assert_eq!(&vec[index + 1..], &items[index..]);

        vec.erase(index);
        prop_assert_eq!(vec.as_slice(), items.as_slice());
    }

    #[test]
    fn clone_from_matches_source(
        dst in prop::collection::vec(any::<i64>(), 0..32),
        src in prop::collection::vec(any::<i64>(), 0..32),
    ) {
        let mut target: Vector<i64> = Vector::from(dst.clone());
        let source: Vector<i64> = Vector::from(src.clone());
        let capacity = target.capacity();

        target.clone_from(&source);
        prop_assert_eq!(target.as_slice(), src.as_slice());
        prop_assert_eq!(target.capacity(), capacity.max(src.len()));
    }

    #[test]
    fn failed_reallocation_changes_nothing(
        len in 1usize..24,
        fail_at in 0usize..24,
        index in any::<prop::sample::Index>(),
        which in 0u8..3,
    ) {
        LIVE.set(0);
        BUDGET.set(None);

        let mut vec = Vector::with_capacity(len);
        for i in 0..len {
            vec.push_back(Counted::new(i as u32));
        }
        let snapshot: Vec<u32> = vec.iter().map(|c| c.0).collect();
        let capacity = vec.capacity();
        let fail_at = fail_at % len;

        BUDGET.set(Some(fail_at));
        let res = catch_unwind(AssertUnwindSafe(|| match which {
            0 => vec.reserve(len * 2),
            1 => vec.resize_with(len * 2, || Counted::new(0)),
            _ => {
                let at = index.index(len + 1);
                vec.insert(at, Counted::new(99));
            }
        }));
        BUDGET.set(None);

        prop_assert!(res.is_err());
        prop_assert_eq!(vec.len(), len);
        prop_assert_eq!(vec.capacity(), capacity);
        prop_assert_eq!(vec.iter().map(|c| c.0).collect::<Vec<_>>(), snapshot);
        prop_assert_eq!(LIVE.get(), len as isize);

        drop(vec);
        prop_assert_eq!(LIVE.get(), 0);
    }

    #[test]
    fn optional_follows_option(ops in prop::collection::vec(prop::option::of(any::<u8>()), 0..50)) {
        let mut opt = Optional::none();
        let mut model = None;

        for op in ops {
            match op {
                Some(v) => {
                    opt.assign(v);
                    model = Some(v);
                }
                None => {
                    prop_assert_eq!(opt.take(), model.take());
                }
            }
            prop_assert_eq!(opt.has_value(), model.is_some());
            prop_assert_eq!(opt.as_option(), model.as_ref());
        }
    }
}
