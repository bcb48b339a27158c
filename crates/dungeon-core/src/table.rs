//! The fixed set of tables that make up the world schema.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the three entity tables.
///
/// Variant order is dependency order: `Connections` and `Sessions` both
/// reference `Locations` by foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Table {
  Locations,
  Connections,
  Sessions,
}

impl Table {
  /// Creation and seeding order.
  pub const ALL: [Table; 3] = [Table::Locations, Table::Connections, Table::Sessions];

  /// Default drop order: dependents before the table they reference.
  pub const DROP_ORDER: [Table; 3] = [Table::Sessions, Table::Connections, Table::Locations];

  /// Display name, as used in outcome lines.
  pub fn name(self) -> &'static str {
    match self {
      Table::Locations => "Locations",
      Table::Connections => "Connections",
      Table::Sessions => "Sessions",
    }
  }

  /// Identifier used in SQL statements.
  pub fn sql_name(self) -> &'static str {
    match self {
      Table::Locations => "locations",
      Table::Connections => "connections",
      Table::Sessions => "sessions",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Table {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Table::ALL
      .into_iter()
      .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::UnknownTable(s.to_owned()))
  }
}
