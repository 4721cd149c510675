//! Key accessor for cached values

use std::rc::Rc;
use std::sync::Arc;

/// A value that can name its own cache key.
///
/// The key must stay the same for as long as the value sits in a cache.
pub trait Keyed {
    /// The string this value is addressed by
    fn key(&self) -> &str;
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

impl Keyed for str {
    fn key(&self) -> &str {
        self
    }
}

impl Keyed for &str {
    fn key(&self) -> &str {
        self
    }
}

impl<T: Keyed + ?Sized> Keyed for Box<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: Keyed + ?Sized> Keyed for Rc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: Keyed + ?Sized> Keyed for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<K: AsRef<str>, V> Keyed for (K, V) {
    fn key(&self) -> &str {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Session {
        id: String,
    }

    impl Keyed for Session {
        fn key(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_keyed_strings() {
        assert_eq!(String::from("alpha").key(), "alpha");
        assert_eq!("beta".key(), "beta");
    }

    #[test]
    fn test_keyed_pairs() {
        assert_eq!(("k1", 7).key(), "k1");
        assert_eq!((String::from("k2"), vec![1u8]).key(), "k2");
    }

    #[test]
    fn test_keyed_smart_pointers() {
        let session = Session { id: "s-1".into() };
        let shared = Arc::new(session);

        assert_eq!(shared.key(), "s-1");
        assert_eq!(Rc::new(String::from("r")).key(), "r");
        assert_eq!(Box::new("b").key(), "b");
        assert_eq!(Arc::<str>::from("a").key(), "a");
    }
}
