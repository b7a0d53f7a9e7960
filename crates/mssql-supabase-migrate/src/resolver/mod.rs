//! Reference resolution: snapshots of target lookup tables held in memory.
//!
//! Every foreign key the mapper substitutes is resolved against one of these
//! maps. Maps are built by paging through the target table until a short page
//! comes back, so a lookup table of any size loads completely; capping the
//! read at a single page silently truncates resolution for tables past the
//! page size.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::target::TargetStore;
use crate::value::SqlValue;

/// Separator between the parts of a composite key.
///
/// ASCII unit separator, a control character that does not occur in account
/// codes, document numbers or period stamps.
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Join normalized key parts into a single map key.
pub fn composite_key(parts: &[&SqlValue]) -> String {
    let mut key = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(&part.key_string());
    }
    key
}

/// Declarative description of one reference table to snapshot.
#[derive(Debug, Clone)]
pub struct ReferenceSpec {
    /// Name the mapper uses to find the map.
    pub name: String,
    /// Target table to read.
    pub table: String,
    /// Columns forming the lookup key, in order.
    pub key_columns: Vec<String>,
    /// Column whose value the lookup yields.
    pub value_column: String,
}

impl ReferenceSpec {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        key_columns: &[&str],
        value_column: impl Into<String>,
    ) -> Self {
        ReferenceSpec {
            name: name.into(),
            table: table.into(),
            key_columns: key_columns.iter().map(|c| c.to_string()).collect(),
            value_column: value_column.into(),
        }
    }
}

/// In-memory snapshot of one reference table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    entries: HashMap<String, SqlValue>,
}

impl ReferenceMap {
    pub fn from_entries(entries: HashMap<String, SqlValue>) -> Self {
        ReferenceMap { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&SqlValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds reference maps against the target store.
pub struct ReferenceResolver<'a> {
    target: &'a dyn TargetStore,
    page_size: usize,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(target: &'a dyn TargetStore, page_size: usize) -> Self {
        ReferenceResolver { target, page_size }
    }

    /// Load one reference table completely.
    ///
    /// Pages with a stable ordering until the store returns fewer rows than
    /// the page size. Key parts are normalized the same way the mapper
    /// normalizes lookup keys, so char(n) padding on either side cancels out.
    pub async fn load(&self, spec: &ReferenceSpec) -> Result<ReferenceMap> {
        let mut entries = HashMap::new();
        let mut offset = 0;

        loop {
            let page = self
                .target
                .fetch_reference_page(
                    &spec.table,
                    &spec.key_columns,
                    &spec.value_column,
                    offset,
                    self.page_size,
                )
                .await?;
            let fetched = page.len();

            for (key_parts, value) in page {
                let refs: Vec<&SqlValue> = key_parts.iter().collect();
                entries.insert(composite_key(&refs), value);
            }

            offset += fetched;
            if fetched < self.page_size {
                break;
            }
        }

        debug!(
            map = %spec.name,
            table = %spec.table,
            entries = entries.len(),
            "loaded reference map"
        );
        Ok(ReferenceMap::from_entries(entries))
    }

    /// Load every map a unit declares, keyed by map name.
    pub async fn load_all(
        &self,
        specs: &[ReferenceSpec],
    ) -> Result<HashMap<String, ReferenceMap>> {
        let mut maps = HashMap::new();
        for spec in specs {
            let map = self.load(spec).await?;
            maps.insert(spec.name.clone(), map);
        }
        Ok(maps)
    }
}
