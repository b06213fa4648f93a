// Compiled-in indicator definitions. Every cache key and every per-indicator
// route is derived from these tables.

use devdash_common::{GenderDataPoint, IndicatorDataPoint, StaticAverage};

use crate::fallback::FallbackPolicy;
use crate::normalize::GenderKeys;

const HDI_INDEX: &str = "HDI - Human Development Index";
const IHDI_INDEX: &str = "IHDI - Inequality-adjusted Human Development Index";
const PHDI_INDEX: &str = "PHDI - Planetary pressures-adjusted Human Development Index";
const GDI_INDEX: &str = "GDI - Gender Development Index";
const GII_INDEX: &str = "GII - Gender Inequality Index";
const MPI_INDEX: &str = "MPI - Multidimensional Poverty Index";

/// A single-valued series from the HDRO composite-indices API.
#[derive(Debug)]
pub struct HdroIndicator {
    pub slug: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    /// Short codes sent in the `indicator` query parameter.
    pub codes: &'static [&'static str],
    pub index: &'static str,
    pub indicator: &'static str,
    pub averages: &'static [StaticAverage],
    pub fallback: FallbackPolicy<IndicatorDataPoint>,
}

/// Which side of a gendered point is compared across countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderComponent {
    Male,
    Female,
    Total,
}

impl GenderComponent {
    pub fn value(&self, point: &GenderDataPoint) -> f64 {
        match self {
            GenderComponent::Male => point.male,
            GenderComponent::Female => point.female,
            GenderComponent::Total => point.total,
        }
    }
}

/// A male/female pair from the HDRO composite-indices API.
#[derive(Debug)]
pub struct GenderIndicator {
    pub slug: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    pub codes: &'static [&'static str],
    pub index: &'static str,
    pub keys: GenderKeys,
    pub compare: GenderComponent,
    pub averages: &'static [StaticAverage],
}

#[derive(Debug)]
pub struct WorldBankIndicator {
    pub slug: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    pub id: &'static str,
    pub averages: &'static [StaticAverage],
    pub fallback: FallbackPolicy<IndicatorDataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct WhoIndicator {
    pub code: &'static str,
    pub name: &'static str,
}

/// Last published Kenya HDI values, served when HDRO is unreachable.
const KENYA_HDI_BASELINE: &[IndicatorDataPoint] = &[
    IndicatorDataPoint {
        year: 2022,
        value: 0.601,
    },
    IndicatorDataPoint {
        year: 2021,
        value: 0.590,
    },
    IndicatorDataPoint {
        year: 2020,
        value: 0.591,
    },
    IndicatorDataPoint {
        year: 2019,
        value: 0.596,
    },
    IndicatorDataPoint {
        year: 2018,
        value: 0.592,
    },
    IndicatorDataPoint {
        year: 2017,
        value: 0.587,
    },
];

const fn avg(label: &'static str, value: f64) -> StaticAverage {
    StaticAverage { label, value }
}

// --- HDRO ---

pub static HDI: HdroIndicator = HdroIndicator {
    slug: "hdi",
    label: "Human Development Index",
    description: "Composite of life expectancy, education and income per capita.",
    category: "human-development",
    unit: "index",
    codes: &["hdi"],
    index: HDI_INDEX,
    indicator: "hdi - Human Development Index (value)",
    averages: &[
        avg("East Africa Average", 0.531),
        avg("Africa Average", 0.549),
        avg("World Average", 0.739),
    ],
    fallback: FallbackPolicy::StaticDefault(KENYA_HDI_BASELINE),
};

pub static IHDI: HdroIndicator = HdroIndicator {
    slug: "ihdi",
    label: "Inequality-adjusted Human Development Index",
    description: "HDI discounted for inequality in each of its dimensions.",
    category: "human-development",
    unit: "index",
    codes: &["ihdi"],
    index: IHDI_INDEX,
    indicator: "ihdi - Inequality-adjusted Human Development Index (value)",
    averages: &[avg("Africa Average", 0.389), avg("World Average", 0.576)],
    fallback: FallbackPolicy::PropagateError,
};

pub static PHDI: HdroIndicator = HdroIndicator {
    slug: "phdi",
    label: "Planetary pressures-adjusted Human Development Index",
    description: "HDI adjusted for carbon emissions and material footprint per capita.",
    category: "environment",
    unit: "index",
    codes: &["phdi"],
    index: PHDI_INDEX,
    indicator: "phdi - Planetary pressures-adjusted Human Development Index (value)",
    averages: &[avg("Africa Average", 0.539), avg("World Average", 0.665)],
    fallback: FallbackPolicy::PropagateError,
};

pub static GDI: HdroIndicator = HdroIndicator {
    slug: "gdi",
    label: "Gender Development Index",
    description: "Ratio of female to male HDI values.",
    category: "gender",
    unit: "ratio",
    codes: &["gdi"],
    index: GDI_INDEX,
    indicator: "gdi - Gender Development Index (value)",
    averages: &[avg("Africa Average", 0.905), avg("World Average", 0.958)],
    fallback: FallbackPolicy::PropagateError,
};

pub static GII: HdroIndicator = HdroIndicator {
    slug: "gii",
    label: "Gender Inequality Index",
    description: "Loss in achievement from inequality between women and men in reproductive health, empowerment and the labour market.",
    category: "gender",
    unit: "index",
    codes: &["gii"],
    index: GII_INDEX,
    indicator: "gii - Gender Inequality Index (value)",
    averages: &[avg("Africa Average", 0.569), avg("World Average", 0.462)],
    fallback: FallbackPolicy::PropagateError,
};

pub static MPI: HdroIndicator = HdroIndicator {
    slug: "mpi",
    label: "Multidimensional Poverty Index",
    description: "Share of people poor in health, education and living standards, weighted by intensity.",
    category: "poverty",
    unit: "index",
    codes: &["mpi_value"],
    index: MPI_INDEX,
    indicator: "mpi_value - Multidimensional Poverty Index (value)",
    averages: &[avg("Africa Average", 0.268)],
    fallback: FallbackPolicy::PropagateError,
};

pub static LIFE_EXPECTANCY: HdroIndicator = HdroIndicator {
    slug: "life-expectancy",
    label: "Life expectancy at birth",
    description: "Years a newborn could expect to live under current age-specific mortality rates.",
    category: "health",
    unit: "years",
    codes: &["le"],
    index: HDI_INDEX,
    indicator: "le - Life Expectancy at Birth (years)",
    averages: &[
        avg("East Africa Average", 63.9),
        avg("Africa Average", 60.6),
        avg("World Average", 72.0),
    ],
    fallback: FallbackPolicy::PropagateError,
};

pub static CO2_EMISSIONS: HdroIndicator = HdroIndicator {
    slug: "co2-emissions",
    label: "Carbon dioxide emissions per capita",
    description: "Production-based CO2 emissions per person.",
    category: "environment",
    unit: "tonnes",
    codes: &["co2_prod"],
    index: PHDI_INDEX,
    indicator: "co2_prod - Carbon dioxide emissions per capita (production) (tonnes)",
    averages: &[avg("Africa Average", 0.7), avg("World Average", 4.6)],
    fallback: FallbackPolicy::PropagateError,
};

pub static HDRO_INDICATORS: &[&HdroIndicator] = &[
    &HDI,
    &IHDI,
    &PHDI,
    &GDI,
    &GII,
    &MPI,
    &LIFE_EXPECTANCY,
    &CO2_EMISSIONS,
];

// --- HDRO gendered ---

pub static PARLIAMENT: GenderIndicator = GenderIndicator {
    slug: "parliament",
    label: "Share of seats in parliament",
    description: "Percentage of parliamentary seats held by women and by men.",
    category: "gender",
    unit: "percent",
    codes: &["pr_f", "pr_m"],
    index: GII_INDEX,
    keys: GenderKeys {
        male: "pr_m - Share of seats in parliament, male (% held by men)",
        female: "pr_f - Share of seats in parliament, female (% held by women)",
        total: None,
    },
    compare: GenderComponent::Female,
    averages: &[avg("Africa Average", 26.1), avg("World Average", 26.5)],
};

pub static GENDER_INDICATORS: &[&GenderIndicator] = &[&PARLIAMENT];

// --- World Bank ---

pub static GNI_PER_CAPITA: WorldBankIndicator = WorldBankIndicator {
    slug: "gni-per-capita",
    label: "GNI per capita (Atlas method)",
    description: "Gross national income divided by midyear population, current US$.",
    category: "economy",
    unit: "current US$",
    id: "NY.GNP.PCAP.CD",
    averages: &[
        avg("East Africa Average", 1_480.0),
        avg("Africa Average", 1_690.0),
        avg("World Average", 13_138.0),
    ],
    fallback: FallbackPolicy::PropagateError,
};

pub static WORLD_BANK_INDICATORS: &[&WorldBankIndicator] = &[&GNI_PER_CAPITA];

// --- WHO GHO ---

pub static WHO_INDICATORS: &[WhoIndicator] = &[
    WhoIndicator {
        code: "WHOSIS_000001",
        name: "Life expectancy at birth (years)",
    },
    WhoIndicator {
        code: "WHOSIS_000002",
        name: "Healthy life expectancy (HALE) at birth (years)",
    },
    WhoIndicator {
        code: "MDG_0000000001",
        name: "Infant mortality rate (per 1000 live births)",
    },
    WhoIndicator {
        code: "MDG_0000000026",
        name: "Maternal mortality ratio (per 100 000 live births)",
    },
    WhoIndicator {
        code: "WHS4_100",
        name: "DTP3 immunization coverage among 1-year-olds (%)",
    },
    WhoIndicator {
        code: "NCD_BMI_30A",
        name: "Prevalence of obesity among adults, BMI >= 30 (age-standardized, %)",
    },
    WhoIndicator {
        code: "UHC_INDEX_REPORTED",
        name: "UHC service coverage index",
    },
];

pub fn hdro_indicator(slug: &str) -> Option<&'static HdroIndicator> {
    HDRO_INDICATORS.iter().copied().find(|d| d.slug == slug)
}

pub fn who_indicator(code: &str) -> Option<&'static WhoIndicator> {
    WHO_INDICATORS
        .iter()
        .find(|d| d.code.eq_ignore_ascii_case(code.trim()))
}
