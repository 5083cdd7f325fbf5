//! Piece catalog: normalized detector keys to inventory code and name.
//!
//! Keys are matched after [`normalize_key`], so the detector may report
//! "Junta Cria", "junta cria" or "junta_cria" for the same piece.

use std::collections::HashMap;

use crate::config::CatalogEntryConfig;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Inventory code, e.g. "02RV-0512"
    pub code: String,
    /// Human-readable part name
    pub name: String,
}

/// Pieces the detection model was trained on.
const BUILTIN: &[(&str, &str, &str)] = &[
    ("junta_cria", "02RV-0512", "JUNTA CRIA 115FL X 302PS"),
    (
        "engrenagem_16dentes",
        "02RV-0043",
        "JCONJ MONT ENGRENAGEM 16 DENTES BI PARTIDA",
    ),
    ("obstaculo_limpeza", "02RV-0098", "OBSTACULO DE LIMPEZA"),
    ("roda_bipartida", "02RV-0042", "CONJ MONT RODA GUIA BI PARTIDA"),
];

/// Lowercase and replace each run of whitespace with a single `_`.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else {
            key.extend(c.to_lowercase());
            in_space = false;
        }
    }
    key
}

/// Static lookup table from normalized piece key to description.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PieceCatalog {
    /// The catalog the detector ships with.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, code, name)| {
                (
                    key.to_string(),
                    CatalogEntry {
                        code: code.to_string(),
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Built-in entries with `extra` layered on top.
    ///
    /// Extra keys are normalized; an extra entry replaces a built-in one with
    /// the same key.
    pub fn with_entries(extra: &[CatalogEntryConfig]) -> Self {
        let mut catalog = Self::builtin();
        for entry in extra {
            catalog.insert(
                &entry.key,
                CatalogEntry {
                    code: entry.code.clone(),
                    name: entry.name.clone(),
                },
            );
        }
        catalog
    }

    /// Insert or replace an entry under the normalized form of `key`.
    pub fn insert(&mut self, key: &str, entry: CatalogEntry) {
        self.entries.insert(normalize_key(key), entry);
    }

    /// Look up a piece by its raw detector name.
    pub fn lookup(&self, piece: &str) -> Option<&CatalogEntry> {
        self.entries.get(&normalize_key(piece))
    }

    /// Number of known pieces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no pieces.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
