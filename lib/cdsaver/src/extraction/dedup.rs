use itertools::Itertools;

/// Drops repeated titles, keeping the first occurrence of each.
pub fn dedup<I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    titles.into_iter().unique().collect()
}
