//! Static product copy for the info panel.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecRow {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub highlight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabBody {
    Specs(&'static [SpecRow]),
    Features(&'static [Feature]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoTab {
    pub id: &'static str,
    pub title: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub body: TabBody,
}

const OVERVIEW: &[SpecRow] = &[
    SpecRow { label: "Model", value: "OdAR-X1" },
    SpecRow { label: "Version", value: "2.1" },
    SpecRow { label: "IP Rating", value: "IP65" },
    SpecRow { label: "Battery", value: "3000mAh Li-Ion" },
];

const TECHNICAL: &[SpecRow] = &[
    SpecRow { label: "Dimensions", value: "100mm × 60mm × 30mm" },
    SpecRow { label: "Weight", value: "180g" },
    SpecRow { label: "Material", value: "Polycarbonate" },
    SpecRow { label: "Processor", value: "ARM Cortex-M4" },
    SpecRow { label: "Memory", value: "256KB RAM" },
    SpecRow { label: "Storage", value: "4MB Flash" },
    SpecRow { label: "USB", value: "USB-C (Data & Power)" },
    SpecRow { label: "Battery Life", value: "Up to 48 hours" },
];

const FEATURES: &[Feature] = &[
    Feature {
        title: "Olfactory Sensor",
        description: "High-precision gas detection sensor capable of identifying various odors and chemical compounds.",
        highlight: true,
    },
    Feature {
        title: "Multi-directional Ultrasonic Sensors",
        description: "Three strategically placed sensors for 180° front, side, and top obstacle detection.",
        highlight: false,
    },
    Feature {
        title: "User Interface",
        description: "High-contrast OLED display with intuitive three-button control system.",
        highlight: false,
    },
    Feature {
        title: "Power System",
        description: "USB-C rechargeable power with low-energy operation mode for extended field use.",
        highlight: false,
    },
];

pub const INFO_TABS: [InfoTab; 3] = [
    InfoTab {
        id: "overview",
        title: "Overview",
        heading: "OdAR System",
        description: "The OdAR (Olfactory Detection and Ranging) system combines advanced olfactory sensors with ultrasonic ranging capabilities for environmental monitoring and safety applications.",
        body: TabBody::Specs(OVERVIEW),
    },
    InfoTab {
        id: "technical",
        title: "Technical",
        heading: "Technical Specifications",
        description: "Precision-engineered with high-grade components for reliability in diverse environments.",
        body: TabBody::Specs(TECHNICAL),
    },
    InfoTab {
        id: "features",
        title: "Features",
        heading: "OdAR System Features",
        description: "Dimensions: 100mm × 60mm × 30mm. Material: Polycarbonate (IP65 Rated).",
        body: TabBody::Features(FEATURES),
    },
];

pub fn tab(id: &str) -> Option<&'static InfoTab> {
    INFO_TABS.iter().find(|t| t.id == id)
}

/// Look up a spec value by label across all spec tables.
pub fn spec_value(label: &str) -> Option<&'static str> {
    INFO_TABS.iter().find_map(|t| match t.body {
        TabBody::Specs(rows) => rows.iter().find(|r| r.label == label).map(|r| r.value),
        TabBody::Features(_) => None,
    })
}
