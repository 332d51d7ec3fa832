use deploycat_definitions::Result;

/// Turn an as-written source struct into its typed definition
///
/// `P` carries whatever context the conversion needs (usually `()`).
pub trait Build<T, P> {
    fn build(self, params: &P) -> Result<T>;
}

impl<T, P, S: Build<T, P>> Build<Option<T>, P> for Option<S> {
    fn build(self, params: &P) -> Result<Option<T>> {
        self.map(|s| s.build(params)).transpose()
    }
}

impl<T, P, S: Build<T, P>> Build<Vec<T>, P> for Vec<S> {
    fn build(self, params: &P) -> Result<Vec<T>> {
        self.into_iter().map(|s| s.build(params)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Build;
    use deploycat_definitions::Result;

    struct Doubled(u32);

    impl Build<u32, u32> for Doubled {
        fn build(self, offset: &u32) -> Result<u32> {
            if self.0 == 0 {
                bail!("zero");
            }
            Ok(self.0 * 2 + offset)
        }
    }

    #[test]
    fn containers() {
        assert_eq!(Some(Doubled(2)).build(&1).unwrap(), Some(5));
        assert_eq!(None::<Doubled>.build(&1).unwrap(), None);
        assert_eq!(vec![Doubled(1), Doubled(2)].build(&0).unwrap(), vec![2, 4]);
        assert!(vec![Doubled(1), Doubled(0)].build(&0).is_err());
    }
}
