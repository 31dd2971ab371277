use super::{Formatter, Params, ToSql};

/// A single identifier, double-quoted with embedded quotes doubled.
pub(super) struct Quoted<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Quoted<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quote = f.serializer.flavor.quote_char();

        f.dst.push(quote);
        for c in self.0.as_ref().chars() {
            if c == quote {
                f.dst.push(quote);
            }
            f.dst.push(c);
        }
        f.dst.push(quote);
    }
}
