#[cfg(feature = "parallel")]
use rayon::prelude::*;

// map_records applies f to every record, keeping record order in the output
#[cfg(feature = "parallel")]
pub(crate) fn map_records<T, F>(corpus: &[String], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    corpus.par_iter().map(|record| f(record.as_str())).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_records<T, F>(corpus: &[String], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    corpus.iter().map(|record| f(record.as_str())).collect()
}
