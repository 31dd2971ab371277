#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Period;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Quoted;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod fragment;

use crate::stmt::{Fragment, Symbol, Value};

use indexmap::IndexMap;

/// Serialize a fragment to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Names assigned to the symbols seen so far, in order of first
    /// appearance.
    symbols: IndexMap<Symbol, usize>,
}

impl Serializer {
    /// Serializes `fragment`, pushing bound values into `params`.
    pub fn serialize(&self, fragment: &Fragment, params: &mut impl Params) -> String {
        let mut ret = String::new();

        {
            let mut fmt = Formatter {
                serializer: self,
                dst: &mut ret,
                params,
                symbols: IndexMap::new(),
            };

            fragment.to_sql(&mut fmt);
        }

        ret
    }

    /// Serializes `fragment` and returns the SQL text along with its bound
    /// values.
    pub fn compile(&self, fragment: &Fragment) -> (String, Vec<Value>) {
        let mut values = vec![];
        let sql = self.serialize(fragment, &mut values);
        (sql, values)
    }
}

impl<T> Formatter<'_, T> {
    fn symbol_index(&mut self, symbol: &Symbol) -> usize {
        let next = self.symbols.len();
        *self.symbols.entry(symbol.clone()).or_insert(next)
    }
}
