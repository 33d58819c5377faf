/// Returns the first candidate that is present, or 0.0 when every source is missing.
///
/// Candidates are listed in priority order (e.g. tracked metric first, rating input second).
/// Values are taken as-is: the ingestion boundary already rejected non-numeric fields.
pub fn first_defined<I>(candidates: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    candidates.into_iter().flatten().next().unwrap_or(0.0)
}
