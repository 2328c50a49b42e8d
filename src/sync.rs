//! Reader-writer guard around a store's entries.
//!
//! With the `multithreaded` feature (the default) the guard is a
//! `std::sync::RwLock`: many readers or one writer. Without it the guard is a
//! `RefCell`, which makes the owning store `!Sync` so it cannot be shared
//! across threads in the first place. Both hand out scoped guards, so a hold
//! is released on every exit path.

use crate::error::{Result, VdbError};

#[cfg(feature = "multithreaded")]
mod imp {
    use super::*;
    use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

    pub type ReadGuard<'a, T> = RwLockReadGuard<'a, T>;
    pub type WriteGuard<'a, T> = RwLockWriteGuard<'a, T>;

    #[derive(Debug)]
    pub struct StoreLock<T> {
        inner: RwLock<T>,
    }

    impl<T> StoreLock<T> {
        pub fn new(value: T) -> Self {
            Self {
                inner: RwLock::new(value),
            }
        }

        /// Acquire a shared hold, blocking while a writer is active.
        pub fn read(&self) -> Result<ReadGuard<'_, T>> {
            self.inner
                .read()
                .map_err(|e| VdbError::ThreadFailure(format!("read lock poisoned: {}", e)))
        }

        /// Acquire an exclusive hold, blocking while any reader or writer is active.
        pub fn write(&self) -> Result<WriteGuard<'_, T>> {
            self.inner
                .write()
                .map_err(|e| VdbError::ThreadFailure(format!("write lock poisoned: {}", e)))
        }

        /// Shared hold for plain accessors. Entries are only mutated through
        /// panic-safe `Vec` operations, so data behind a poisoned lock is
        /// still consistent.
        pub fn read_recovering(&self) -> ReadGuard<'_, T> {
            self.inner.read().unwrap_or_else(PoisonError::into_inner)
        }

        /// Unwrap the guarded value. A poisoned lock still yields its data.
        pub fn into_inner(self) -> T {
            self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(not(feature = "multithreaded"))]
mod imp {
    use super::*;
    use std::cell::{Ref, RefCell, RefMut};

    pub type ReadGuard<'a, T> = Ref<'a, T>;
    pub type WriteGuard<'a, T> = RefMut<'a, T>;

    #[derive(Debug)]
    pub struct StoreLock<T> {
        inner: RefCell<T>,
    }

    impl<T> StoreLock<T> {
        pub fn new(value: T) -> Self {
            Self {
                inner: RefCell::new(value),
            }
        }

        pub fn read(&self) -> Result<ReadGuard<'_, T>> {
            self.inner
                .try_borrow()
                .map_err(|e| VdbError::ThreadFailure(format!("store already borrowed: {}", e)))
        }

        pub fn write(&self) -> Result<WriteGuard<'_, T>> {
            self.inner
                .try_borrow_mut()
                .map_err(|e| VdbError::ThreadFailure(format!("store already borrowed: {}", e)))
        }

        /// Guards never outlive a store method, so this borrow cannot conflict.
        pub fn read_recovering(&self) -> ReadGuard<'_, T> {
            self.inner.borrow()
        }

        pub fn into_inner(self) -> T {
            self.inner.into_inner()
        }
    }
}

pub use imp::{ReadGuard, StoreLock, WriteGuard};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_then_write() {
        let lock = StoreLock::new(vec![1, 2]);
        {
            let a = lock.read().unwrap();
            let b = lock.read().unwrap();
            assert_eq!(a.len() + b.len(), 4);
        }
        lock.write().unwrap().push(3);
        assert_eq!(lock.into_inner(), vec![1, 2, 3]);
    }

    #[cfg(feature = "multithreaded")]
    #[test]
    fn test_poisoned_lock_reports_thread_failure() {
        use std::sync::Arc;

        let lock = Arc::new(StoreLock::new(0u32));
        let writer = Arc::clone(&lock);
        let handle = std::thread::spawn(move || {
            let _guard = writer.write().unwrap();
            panic!("writer died holding the lock");
        });
        assert!(handle.join().is_err());

        assert!(matches!(lock.read(), Err(VdbError::ThreadFailure(_))));
        assert!(matches!(lock.write(), Err(VdbError::ThreadFailure(_))));
        assert_eq!(*lock.read_recovering(), 0);
    }

    #[cfg(not(feature = "multithreaded"))]
    #[test]
    fn test_conflicting_borrow_reports_thread_failure() {
        let lock = StoreLock::new(0u32);
        let _reader = lock.read().unwrap();
        assert!(matches!(lock.write(), Err(VdbError::ThreadFailure(_))));
    }
}
