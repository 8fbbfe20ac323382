pub mod defs;

use serde::Serialize;

use crate::model::{CellRecord, Region};
use defs::{FlagRef, PanelDef, REGION_PLACEHOLDER, builtin_panels};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagTerm {
    pub flag: String,
    pub expected: bool,
}

/// Conjunction of flag terms over a [`CellRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelPredicate {
    pub terms: Vec<FlagTerm>,
}

impl PanelPredicate {
    pub fn matches(&self, cell: &CellRecord) -> bool {
        self.terms.iter().all(|t| cell.flag(&t.flag) == t.expected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSpec {
    pub id: &'static str,
    pub title: String,
    pub predicate: PanelPredicate,
}

impl PanelSpec {
    pub fn matches(&self, cell: &CellRecord) -> bool {
        self.predicate.matches(cell)
    }
}

fn resolve_flag(flag: FlagRef, region: Region) -> String {
    match flag {
        FlagRef::InRegion => region.in_flag(),
        FlagRef::RegionCorrect => region.correct_flag(),
        FlagRef::Named(name) => name.to_string(),
    }
}

fn build_panel(def: &PanelDef, region: Region) -> PanelSpec {
    let required = def.require.iter().map(|&f| FlagTerm {
        flag: resolve_flag(f, region),
        expected: true,
    });
    let excluded = def.exclude.iter().map(|&f| FlagTerm {
        flag: resolve_flag(f, region),
        expected: false,
    });
    PanelSpec {
        id: def.id,
        title: def
            .title_template
            .replace(REGION_PLACEHOLDER, region.display_name()),
        predicate: PanelPredicate {
            terms: required.chain(excluded).collect(),
        },
    }
}

/// The fixed, ordered panel grid for `region`. Both the theta view and the
/// components view build their grids from this.
pub fn build_panels(region: Region) -> Vec<PanelSpec> {
    builtin_panels()
        .iter()
        .map(|def| build_panel(def, region))
        .collect()
}

/// Cells matching each panel, in panel order. Input order is kept within a
/// panel and a cell may land in several panels.
pub fn partition<'a>(panels: &[PanelSpec], cells: &'a [CellRecord]) -> Vec<Vec<&'a CellRecord>> {
    panels
        .iter()
        .map(|panel| cells.iter().filter(|c| panel.matches(c)).collect())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
