use std::collections::BTreeMap;

use crate::error::{GasError, GasResult};
use crate::properties::GasProperties;

/// One species in a gas table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GasEntry {
    /// Canonical identifier, e.g. `"N2"`.
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub properties: GasProperties,
}

impl GasEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, properties: GasProperties) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            properties,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Exact, case-insensitive match on id, name or any alias.
    pub fn is_named(&self, query: &str) -> bool {
        let query = query.trim();
        self.id.eq_ignore_ascii_case(query)
            || self.name.eq_ignore_ascii_case(query)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(query))
    }

    /// Substring match used for search boxes. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_ascii_lowercase().contains(&query)
            || self.name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

struct BuiltinGas {
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    molar_mass: f64,
    cp: f64,
    cv: f64,
    vdw_a: f64,
    vdw_b: f64,
}

// Cp/Cv at 298 K; a converted from bar·L²/mol² to kPa·L²/mol².
const BUILTIN_GASES: [BuiltinGas; 14] = [
    BuiltinGas {
        id: "He",
        name: "Helium",
        aliases: &["helium"],
        molar_mass: 4.003,
        cp: 20.786,
        cv: 12.472,
        vdw_a: 3.46,
        vdw_b: 0.0238,
    },
    BuiltinGas {
        id: "Ne",
        name: "Neon",
        aliases: &["neon"],
        molar_mass: 20.180,
        cp: 20.786,
        cv: 12.472,
        vdw_a: 20.8,
        vdw_b: 0.01672,
    },
    BuiltinGas {
        id: "Ar",
        name: "Argon",
        aliases: &["argon"],
        molar_mass: 39.948,
        cp: 20.786,
        cv: 12.472,
        vdw_a: 135.5,
        vdw_b: 0.03201,
    },
    BuiltinGas {
        id: "Kr",
        name: "Krypton",
        aliases: &["krypton"],
        molar_mass: 83.798,
        cp: 20.786,
        cv: 12.472,
        vdw_a: 231.8,
        vdw_b: 0.03978,
    },
    BuiltinGas {
        id: "Xe",
        name: "Xenon",
        aliases: &["xenon"],
        molar_mass: 131.293,
        cp: 20.786,
        cv: 12.472,
        vdw_a: 419.2,
        vdw_b: 0.05156,
    },
    BuiltinGas {
        id: "H2",
        name: "Hydrogen",
        aliases: &["hydrogen"],
        molar_mass: 2.016,
        cp: 28.836,
        cv: 20.522,
        vdw_a: 24.76,
        vdw_b: 0.02661,
    },
    BuiltinGas {
        id: "N2",
        name: "Nitrogen",
        aliases: &["nitrogen"],
        molar_mass: 28.014,
        cp: 29.124,
        cv: 20.810,
        vdw_a: 137.0,
        vdw_b: 0.0387,
    },
    BuiltinGas {
        id: "O2",
        name: "Oxygen",
        aliases: &["oxygen"],
        molar_mass: 31.999,
        cp: 29.378,
        cv: 21.064,
        vdw_a: 138.2,
        vdw_b: 0.03186,
    },
    BuiltinGas {
        id: "Air",
        name: "Air",
        aliases: &["atmosphere"],
        molar_mass: 28.965,
        cp: 29.07,
        cv: 20.76,
        vdw_a: 136.8,
        vdw_b: 0.0367,
    },
    BuiltinGas {
        id: "CO",
        name: "Carbon Monoxide",
        aliases: &["carbon monoxide"],
        molar_mass: 28.010,
        cp: 29.142,
        cv: 20.828,
        vdw_a: 150.5,
        vdw_b: 0.03985,
    },
    BuiltinGas {
        id: "CO2",
        name: "Carbon Dioxide",
        aliases: &["carbon dioxide"],
        molar_mass: 44.010,
        cp: 37.135,
        cv: 28.821,
        vdw_a: 364.0,
        vdw_b: 0.04267,
    },
    BuiltinGas {
        id: "CH4",
        name: "Methane",
        aliases: &["methane"],
        molar_mass: 16.043,
        cp: 35.69,
        cv: 27.38,
        vdw_a: 228.3,
        vdw_b: 0.04278,
    },
    BuiltinGas {
        id: "H2O",
        name: "Water Vapor",
        aliases: &["water", "steam"],
        molar_mass: 18.015,
        cp: 33.58,
        cv: 25.27,
        vdw_a: 553.6,
        vdw_b: 0.03049,
    },
    BuiltinGas {
        id: "NH3",
        name: "Ammonia",
        aliases: &["ammonia"],
        molar_mass: 17.031,
        cp: 35.06,
        cv: 26.75,
        vdw_a: 422.5,
        vdw_b: 0.0371,
    },
];

/// Immutable mapping from species id to its property record.
///
/// Keys are compared case-insensitively. Every entry is validated on
/// insertion, so a table never holds a record with Cp ≤ Cv or M ≤ 0.
#[derive(Debug, Clone, PartialEq)]
pub struct GasTable {
    entries: BTreeMap<String, GasEntry>,
}

fn table_key(id: &str) -> String {
    id.trim().to_ascii_uppercase()
}

impl GasTable {
    /// The built-in table of common gases.
    pub fn builtin() -> Self {
        let entries = BUILTIN_GASES
            .iter()
            .map(|g| {
                let entry = GasEntry::new(
                    g.id,
                    g.name,
                    GasProperties {
                        molar_mass: g.molar_mass,
                        cp: g.cp,
                        cv: g.cv,
                        vdw_a: g.vdw_a,
                        vdw_b: g.vdw_b,
                    },
                )
                .with_aliases(g.aliases.iter().copied());
                (table_key(g.id), entry)
            })
            .collect();
        Self { entries }
    }

    /// Build a table from arbitrary entries, validating each record.
    pub fn from_entries<I>(entries: I) -> GasResult<Self>
    where
        I: IntoIterator<Item = GasEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            entry.properties.validate(&entry.id)?;
            let key = table_key(&entry.id);
            if map.contains_key(&key) {
                return Err(GasError::DuplicateId { id: entry.id });
            }
            map.insert(key, entry);
        }
        Ok(Self { entries: map })
    }

    /// Return a new table with `entry` added, replacing any entry with the same id.
    pub fn with_gas(&self, entry: GasEntry) -> GasResult<Self> {
        entry.properties.validate(&entry.id)?;
        let mut entries = self.entries.clone();
        entries.insert(table_key(&entry.id), entry);
        Ok(Self { entries })
    }

    /// Look up by canonical id.
    pub fn get(&self, id: &str) -> Option<&GasEntry> {
        self.entries.get(&table_key(id))
    }

    /// Look up by id, display name or alias.
    pub fn find(&self, query: &str) -> GasResult<&GasEntry> {
        self.get(query)
            .or_else(|| self.entries.values().find(|e| e.is_named(query)))
            .ok_or_else(|| GasError::UnknownGas {
                query: query.to_string(),
            })
    }

    pub fn filter(&self, query: &str) -> Vec<&GasEntry> {
        self.entries
            .values()
            .filter(|entry| entry.matches_query(query))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GasEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GasTableFile {
    gases: Vec<GasEntry>,
}

#[cfg(feature = "serde")]
impl GasTable {
    /// Parse a table file of the form `gases: [{ id, name, aliases, molar_mass, cp, cv, vdw_a, vdw_b }]`.
    pub fn from_yaml_str(text: &str) -> GasResult<Self> {
        let file: GasTableFile = serde_yaml::from_str(text).map_err(|e| GasError::Parse {
            message: e.to_string(),
        })?;
        tracing::debug!(count = file.gases.len(), "parsed YAML gas table");
        Self::from_entries(file.gases)
    }

    pub fn from_json_str(text: &str) -> GasResult<Self> {
        let file: GasTableFile = serde_json::from_str(text).map_err(|e| GasError::Parse {
            message: e.to_string(),
        })?;
        tracing::debug!(count = file.gases.len(), "parsed JSON gas table");
        Self::from_entries(file.gases)
    }

    pub fn to_yaml_string(&self) -> GasResult<String> {
        let file = GasTableFile {
            gases: self.entries.values().cloned().collect(),
        };
        serde_yaml::to_string(&file).map_err(|e| GasError::Parse {
            message: e.to_string(),
        })
    }
}
