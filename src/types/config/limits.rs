//! Runtime limit configuration types

use std::num::NonZeroUsize;

nonzero_newtype! {
    /// A non-zero worker thread count
    ///
    /// # Examples
    /// ```
    /// use gemini_gateway::types::ThreadCount;
    ///
    /// let threads = ThreadCount::new(4).unwrap();
    /// assert_eq!(threads.get(), 4);
    /// assert!(ThreadCount::new(0).is_none());
    /// ```
    pub struct ThreadCount(NonZeroUsize: usize, serialize as serialize_u64);
}

impl ThreadCount {
    /// Single worker thread (current-thread runtime)
    pub const DEFAULT: Self = Self(NonZeroUsize::new(1).unwrap());

    /// Thread count matching the available CPU parallelism
    #[must_use]
    pub fn from_available_parallelism() -> Self {
        std::thread::available_parallelism()
            .map(Self)
            .unwrap_or(Self::DEFAULT)
    }
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::str::FromStr for ThreadCount {
    type Err = std::num::ParseIntError;

    /// `0` selects one thread per available CPU
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<usize>()?;
        Ok(Self::new(value).unwrap_or_else(Self::from_available_parallelism))
    }
}
