use super::Fragment;

/// The query currently being assembled for one request.
///
/// Each in-flight query owns its builder; nothing here is shared between
/// requests.
pub trait QueryBuilder {
    /// The alias the query uses for its source table.
    fn table_alias(&self) -> Fragment;

    /// Adds `expr AS alias` to the projection list.
    fn select(&mut self, expr: Fragment, alias: &str);
}
