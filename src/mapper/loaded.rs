/// Load state of one relationship slot on a fetched record.
///
/// Distinguishes "the query never fetched this relation" from "the
/// relation was fetched and there is nothing there". Repositories are the
/// only writers: a slot is `NotFetched` unless the query eager-loaded the
/// relation. The mapper reads a `NotFetched` slot only when relations were
/// not requested; hitting one while relations were requested is a caller
/// contract violation.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Loaded<T> {
    /// The query did not ask for this relation.
    #[default]
    NotFetched,
    /// The relation was fetched and no related row exists.
    Absent,
    /// The relation was fetched and the related value is present.
    Present(T),
}

impl<T> Loaded<T> {
    /// Wraps an eager-load result: `None` becomes `Absent`.
    pub fn fetched(value: Option<T>) -> Self {
        match value {
            Some(value) => Loaded::Present(value),
            None => Loaded::Absent,
        }
    }

    pub fn is_fetched(&self) -> bool {
        !matches!(self, Loaded::NotFetched)
    }
}
