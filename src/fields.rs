//! Canonical field sets and their spreadsheet header aliases.
//!
//! The source workbooks are maintained by hand across months and sites, so
//! the same logical column shows up under many spellings ("GSM", "Grammage",
//! "Basis Weight", ...). Every column the pipeline consumes is one of the
//! fixed identifiers below; the resolver matches raw headers against each
//! field's ordered alias list, most specific spelling first.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A member of one canonical field set.
///
/// Implementors enumerate their members in resolution order and supply the
/// ordered header spellings the resolver may accept for each member.
pub trait Field: Copy + Eq + Hash + fmt::Debug {
    /// Every field in the set, in resolution order.
    fn all() -> Vec<Self>;

    /// Ordered list of header spellings accepted for this field.
    fn aliases(&self) -> Vec<String>;
}

/// Control-limit defaults applied when a limit column is absent or blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitDefault {
    /// Lower/upper limits as multiples of the measured value.
    Factor(f64, f64),
    /// Fixed limits independent of the measured value.
    Fixed(f64, f64),
}

impl LimitDefault {
    pub fn bounds(self, value: f64) -> (f64, f64) {
        match self {
            LimitDefault::Factor(lo, hi) => (value * lo, value * hi),
            LimitDefault::Fixed(lo, hi) => (lo, hi),
        }
    }
}

/// Quality measurements recorded per shift on the paper machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Gsm,
    Thickness,
    Bulk,
    TensileMd,
    TensileCd,
    MdCdRatio,
    StretchMd,
    StretchCd,
    WetTensile,
    Brightness,
    Opacity,
    Moisture,
    Softness,
    Absorbency,
    AbsorbencyTime,
    AshContent,
    BurstStrength,
    DustLevel,
}

impl Metric {
    pub const ALL: [Metric; 18] = [
        Metric::Gsm,
        Metric::Thickness,
        Metric::Bulk,
        Metric::TensileMd,
        Metric::TensileCd,
        Metric::MdCdRatio,
        Metric::StretchMd,
        Metric::StretchCd,
        Metric::WetTensile,
        Metric::Brightness,
        Metric::Opacity,
        Metric::Moisture,
        Metric::Softness,
        Metric::Absorbency,
        Metric::AbsorbencyTime,
        Metric::AshContent,
        Metric::BurstStrength,
        Metric::DustLevel,
    ];

    /// Canonical identifier, also the JSON key used for this metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Gsm => "gsm",
            Metric::Thickness => "thickness",
            Metric::Bulk => "bulk",
            Metric::TensileMd => "tensileMd",
            Metric::TensileCd => "tensileCd",
            Metric::MdCdRatio => "mdCdRatio",
            Metric::StretchMd => "stretchMd",
            Metric::StretchCd => "stretchCd",
            Metric::WetTensile => "wetTensile",
            Metric::Brightness => "brightness",
            Metric::Opacity => "opacity",
            Metric::Moisture => "moisture",
            Metric::Softness => "softness",
            Metric::Absorbency => "absorbency",
            Metric::AbsorbencyTime => "absorbencyTime",
            Metric::AshContent => "ashContent",
            Metric::BurstStrength => "burstStrength",
            Metric::DustLevel => "dustLevel",
        }
    }

    /// Header spellings observed for this metric's value column.
    pub fn header_aliases(self) -> &'static [&'static str] {
        match self {
            Metric::Gsm => &["GSM", "GSM g/m2", "Grammage", "Basis Weight", "GSM (g/m2)"],
            Metric::Thickness => &[
                "Thickness",
                "Caliper",
                "Thickness (micron)",
                "Caliper mic",
                "THICKNESS",
            ],
            Metric::Bulk => &["Bulk", "Bulk cc/g", "Specific Volume"],
            Metric::TensileMd => &[
                "Dry Strength (MD)",
                "Dry Strength MD",
                "Tensile MD",
                "TS MD",
                "MD Tensile",
                "Dry_Strength_MD",
            ],
            Metric::TensileCd => &[
                "Dry Strength (CD)",
                "Dry Strength CD",
                "Tensile CD",
                "TS CD",
                "CD Tensile",
                "Dry_Strength_CD",
            ],
            Metric::MdCdRatio => &["MD/CD Ratio", "MD CD Ratio", "Tensile Ratio", "MD:CD"],
            Metric::StretchMd => &["Stretch (MD)", "Stretch MD", "Elongation MD"],
            Metric::StretchCd => &["Stretch (CD)", "Stretch CD", "Elongation CD"],
            Metric::WetTensile => &[
                "Wet Strength (CD)",
                "Wet Tensile",
                "Wet Strength",
                "WS CD",
            ],
            Metric::Brightness => &["Brightness", "Brightness %ISO", "ISO Brightness"],
            Metric::Opacity => &["Opacity", "Opacity %", "OPACITY"],
            Metric::Moisture => &["Moisture", "Moisture %", "Moisture Content", "MOISTURE"],
            Metric::Softness => &["Softness", "Hand Feel", "TSA Softness"],
            Metric::Absorbency => &[
                "Absorbency",
                "Water Absorbency",
                "Absorption Capacity",
                "Klemm Absorbency",
            ],
            Metric::AbsorbencyTime => &["Absorbency Time", "Absorption Time", "Sink Time"],
            Metric::AshContent => &["Ash", "Ash %", "Ash Content"],
            Metric::BurstStrength => &["Burst", "Burst Strength", "Burst Factor"],
            Metric::DustLevel => &["Dust", "Dust Level", "Linting"],
        }
    }

    /// Control-limit defaults used when a limit column is absent.
    ///
    /// Tensile limits run wider than the other metrics; opacity and moisture
    /// are bounded by fixed process windows rather than the measured value.
    pub fn limit_default(self) -> LimitDefault {
        match self {
            Metric::TensileMd | Metric::TensileCd => LimitDefault::Factor(0.90, 1.10),
            Metric::Opacity => LimitDefault::Fixed(40.0, 60.0),
            Metric::Moisture => LimitDefault::Fixed(4.0, 8.0),
            _ => LimitDefault::Factor(0.95, 1.05),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of the per-shift quality sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityField {
    Date,
    Time,
    Shift,
    Grade,
    GsmGrade,
    LabTechnician,
    MachineOperator,
    Remarks,
    Value(Metric),
    Lcl(Metric),
    Ucl(Metric),
}

impl Field for QualityField {
    fn all() -> Vec<Self> {
        let mut fields = vec![
            QualityField::Date,
            QualityField::Time,
            QualityField::Shift,
            QualityField::Grade,
            QualityField::GsmGrade,
            QualityField::LabTechnician,
            QualityField::MachineOperator,
            QualityField::Remarks,
        ];
        for metric in Metric::ALL {
            fields.push(QualityField::Value(metric));
            fields.push(QualityField::Lcl(metric));
            fields.push(QualityField::Ucl(metric));
        }
        fields
    }

    fn aliases(&self) -> Vec<String> {
        match self {
            QualityField::Date => owned(&["Date", "DATE", "Production Date"]),
            QualityField::Time => owned(&["Time", "Sample Time", "TIME"]),
            QualityField::Shift => owned(&["Shift", "SHIFT", "Shift Name"]),
            QualityField::Grade => {
                owned(&["Quality", "Grade", "Quality Grade", "Product Grade"])
            }
            QualityField::GsmGrade => owned(&["GSM Grade", "Grade GSM", "GSM_Grade"]),
            QualityField::LabTechnician => {
                owned(&["Lab Technician", "Lab Tech", "Tested By", "Analyst"])
            }
            QualityField::MachineOperator => {
                owned(&["Machine Operator", "Operator", "Shift Incharge"])
            }
            QualityField::Remarks => owned(&["Remarks", "Comments", "Observation", "Note"]),
            QualityField::Value(metric) => owned(metric.header_aliases()),
            QualityField::Lcl(metric) => limit_aliases(*metric, "LCL", "Min"),
            QualityField::Ucl(metric) => limit_aliases(*metric, "UCL", "Max"),
        }
    }
}

/// Limit columns inherit their spellings from the metric they bound: the two
/// leading metric aliases suffixed with the limit tag, then the short-form
/// variants seen in older sheets.
fn limit_aliases(metric: Metric, tag: &str, word: &str) -> Vec<String> {
    let aliases = metric.header_aliases();
    let primary = aliases[0];
    let mut spellings = Vec::with_capacity(4);
    for alias in aliases.iter().take(2) {
        spellings.push(format!("{alias} {tag}"));
    }
    spellings.push(format!("{primary} {word}"));
    spellings.push(format!("{tag} {primary}"));
    spellings
}

/// Itemized daily cost categories of the costing sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum CostItem {
    Fiber,
    Chemicals,
    Steam,
    Electricity,
    Labor,
    Water,
    Maintenance,
    Overhead,
    Waste,
    Packaging,
}

impl CostItem {
    pub const ALL: [CostItem; 10] = [
        CostItem::Fiber,
        CostItem::Chemicals,
        CostItem::Steam,
        CostItem::Electricity,
        CostItem::Labor,
        CostItem::Water,
        CostItem::Maintenance,
        CostItem::Overhead,
        CostItem::Waste,
        CostItem::Packaging,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CostItem::Fiber => "fiber",
            CostItem::Chemicals => "chemicals",
            CostItem::Steam => "steam",
            CostItem::Electricity => "electricity",
            CostItem::Labor => "labor",
            CostItem::Water => "water",
            CostItem::Maintenance => "maintenance",
            CostItem::Overhead => "overhead",
            CostItem::Waste => "waste",
            CostItem::Packaging => "packaging",
        }
    }

    fn header_aliases(self) -> &'static [&'static str] {
        match self {
            CostItem::Fiber => &["Fiber", "Fibre", "Fiber Cost", "Pulp", "Furnish Cost"],
            CostItem::Chemicals => &["Chemicals", "Chemical Cost", "Chemical"],
            CostItem::Steam => &["Steam", "Steam Cost", "Steam Charges"],
            CostItem::Electricity => &["Electricity", "Power", "Power Cost", "Electricity Cost"],
            CostItem::Labor => &["Labor", "Labour", "Manpower", "Labour Cost"],
            CostItem::Water => &["Water", "Water Cost", "Water Charges"],
            CostItem::Maintenance => &[
                "Maintenance",
                "Repair & Maintenance",
                "R&M",
                "Maintenance Cost",
            ],
            CostItem::Overhead => &["Overhead", "Overheads", "Fixed Overhead", "Admin Overhead"],
            CostItem::Waste => &["Waste", "Wastage", "Broke", "Waste Cost"],
            CostItem::Packaging => &["Packaging", "Packing", "Packing Cost", "Packaging Cost"],
        }
    }
}

impl fmt::Display for CostItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of the daily costing sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostingField {
    Date,
    Grade,
    GsmGrade,
    TotalProduction,
    TotalCost,
    CostPerKg,
    CostPerTon,
    CostPerSaleableTon,
    Item(CostItem),
}

impl Field for CostingField {
    fn all() -> Vec<Self> {
        let mut fields = vec![
            CostingField::Date,
            CostingField::Grade,
            CostingField::GsmGrade,
            CostingField::TotalProduction,
            CostingField::TotalCost,
            CostingField::CostPerKg,
            CostingField::CostPerTon,
            CostingField::CostPerSaleableTon,
        ];
        for item in CostItem::ALL {
            fields.push(CostingField::Item(item));
        }
        fields
    }

    fn aliases(&self) -> Vec<String> {
        match self {
            CostingField::Date => owned(&["Date", "DATE", "Production Date", "Costing Date"]),
            CostingField::Grade => owned(&["Quality", "Grade", "Quality Grade"]),
            CostingField::GsmGrade => owned(&["GSM Grade", "GSM", "Grade GSM"]),
            CostingField::TotalProduction => owned(&[
                "Production",
                "Total Production",
                "Production (MT)",
                "Prod MT",
            ]),
            CostingField::TotalCost => {
                owned(&["Total Cost", "Total Cost (Rs)", "Cost Total", "TOTAL COST"])
            }
            CostingField::CostPerKg => owned(&["Cost/Kg", "Cost per Kg", "Rs/Kg"]),
            CostingField::CostPerTon => {
                owned(&["Cost/Ton", "Cost per Ton", "Cost/MT", "Rs/MT"])
            }
            CostingField::CostPerSaleableTon => owned(&[
                "Cost/Saleable Ton",
                "Cost per Saleable Ton",
                "Saleable Cost/MT",
            ]),
            CostingField::Item(item) => owned(item.header_aliases()),
        }
    }
}

/// Columns of the optional raw-material consumption sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawMaterialField {
    Date,
    Material,
    Quantity,
    Rate,
    Cost,
}

impl Field for RawMaterialField {
    fn all() -> Vec<Self> {
        vec![
            RawMaterialField::Date,
            RawMaterialField::Material,
            RawMaterialField::Quantity,
            RawMaterialField::Rate,
            RawMaterialField::Cost,
        ]
    }

    fn aliases(&self) -> Vec<String> {
        match self {
            RawMaterialField::Date => owned(&["Date", "DATE", "Consumption Date"]),
            RawMaterialField::Material => owned(&[
                "Material",
                "Raw Material",
                "RM Name",
                "Material Name",
                "Item",
            ]),
            RawMaterialField::Quantity => {
                owned(&["Quantity", "Qty", "Consumption", "Qty (Kg)"])
            }
            RawMaterialField::Rate => owned(&["Rate", "Rate/Kg", "Unit Rate", "Price"]),
            RawMaterialField::Cost => owned(&["Cost", "Amount", "Total Amount", "Value"]),
        }
    }
}

/// Columns of the optional production-loss sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossField {
    Date,
    Category,
    DurationHours,
    TonnesLost,
    Remarks,
}

impl Field for LossField {
    fn all() -> Vec<Self> {
        vec![
            LossField::Date,
            LossField::Category,
            LossField::DurationHours,
            LossField::TonnesLost,
            LossField::Remarks,
        ]
    }

    fn aliases(&self) -> Vec<String> {
        match self {
            LossField::Date => owned(&["Date", "DATE", "Loss Date"]),
            LossField::Category => {
                owned(&["Category", "Loss Category", "Reason", "Loss Type"])
            }
            LossField::DurationHours => owned(&[
                "Duration",
                "Hours Lost",
                "Downtime (hrs)",
                "Duration (hrs)",
            ]),
            LossField::TonnesLost => {
                owned(&["Tonnes Lost", "Production Loss", "Loss (MT)", "MT Lost"])
            }
            LossField::Remarks => owned(&["Remarks", "Comments", "Details"]),
        }
    }
}

fn owned(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|a| (*a).to_string()).collect()
}
