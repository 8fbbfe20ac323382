/// Which flag of a cell a predicate term reads. Region-relative references
/// are resolved against the active region when panels are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRef {
    InRegion,
    RegionCorrect,
    Named(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct PanelDef {
    pub id: &'static str,
    pub title_template: &'static str,
    pub require: &'static [FlagRef],
    pub exclude: &'static [FlagRef],
}

pub const REGION_PLACEHOLDER: &str = "{region}";

const IN_REGION: &[FlagRef] = &[FlagRef::InRegion];

const BUILTIN_PANELS: &[PanelDef] = &[
    PanelDef {
        id: "self",
        title_template: "{region} in {region}",
        require: &[FlagRef::InRegion, FlagRef::RegionCorrect],
        exclude: &[],
    },
    PanelDef {
        id: "ca2",
        title_template: "CA2 in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_ca2")],
        exclude: &[],
    },
    PanelDef {
        id: "ca3",
        title_template: "CA3 in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_ca3")],
        exclude: &[],
    },
    PanelDef {
        id: "dg",
        title_template: "DG in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_dg")],
        exclude: &[],
    },
    PanelDef {
        id: "l23",
        title_template: "L2/3 in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_L23")],
        exclude: &[],
    },
    PanelDef {
        id: "l45",
        title_template: "L4/5 in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_L45")],
        exclude: &[],
    },
    PanelDef {
        id: "l6",
        title_template: "L6 in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_L6")],
        exclude: &[],
    },
    PanelDef {
        id: "other",
        title_template: "non-{region} in {region}",
        require: IN_REGION,
        exclude: &[FlagRef::RegionCorrect, FlagRef::Named("is_zero")],
    },
    PanelDef {
        id: "zero",
        title_template: "Zero in {region}",
        require: &[FlagRef::InRegion, FlagRef::Named("is_zero")],
        exclude: &[],
    },
];

/// The nine panel definitions in display order (row-major 3x3 grid).
pub fn builtin_panels() -> &'static [PanelDef] {
    BUILTIN_PANELS
}
