use crate::models::{SdgGoal, SdgTarget};

/// Mean `progress` over all goals, rounded to one decimal place.
pub fn overall_score(goals: &[SdgGoal]) -> Option<f64> {
    if goals.is_empty() {
        return None;
    }
    let mean = goals.iter().map(|g| g.progress).sum::<f64>() / goals.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Compiled-in definition of one goal, used to seed the store.
#[derive(Debug)]
pub struct SdgGoalDef {
    pub number: i32,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Kenya baseline progress, percent.
    pub progress: f64,
    /// `(code, name)` of the headline targets tracked for the goal.
    pub targets: &'static [(&'static str, &'static str)],
}

impl SdgGoalDef {
    pub fn to_goal(&self) -> SdgGoal {
        SdgGoal {
            number: self.number,
            slug: self.slug.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            progress: self.progress,
            color: self.color.to_string(),
            indicators: self
                .targets
                .iter()
                .map(|&(code, name)| SdgTarget {
                    code: code.to_string(),
                    name: name.to_string(),
                    value: None,
                    year: None,
                })
                .collect(),
        }
    }
}

pub static SDG_GOALS: &[SdgGoalDef] = &[
    SdgGoalDef {
        number: 1,
        slug: "no-poverty",
        title: "No Poverty",
        description: "End poverty in all its forms everywhere.",
        color: "#E5243B",
        progress: 48.3,
        targets: &[("1.1.1", "Population below the international poverty line")],
    },
    SdgGoalDef {
        number: 2,
        slug: "zero-hunger",
        title: "Zero Hunger",
        description: "End hunger, achieve food security and improved nutrition and promote sustainable agriculture.",
        color: "#DDA63A",
        progress: 46.1,
        targets: &[
            ("2.1.1", "Prevalence of undernourishment"),
            ("2.2.1", "Prevalence of stunting among children under 5"),
        ],
    },
    SdgGoalDef {
        number: 3,
        slug: "good-health",
        title: "Good Health and Well-being",
        description: "Ensure healthy lives and promote well-being for all at all ages.",
        color: "#4C9F38",
        progress: 52.7,
        targets: &[
            ("3.1.1", "Maternal mortality ratio"),
            ("3.2.1", "Under-five mortality rate"),
        ],
    },
    SdgGoalDef {
        number: 4,
        slug: "quality-education",
        title: "Quality Education",
        description: "Ensure inclusive and equitable quality education and promote lifelong learning opportunities for all.",
        color: "#C5192D",
        progress: 71.4,
        targets: &[("4.1.2", "Completion rate, primary education")],
    },
    SdgGoalDef {
        number: 5,
        slug: "gender-equality",
        title: "Gender Equality",
        description: "Achieve gender equality and empower all women and girls.",
        color: "#FF3A21",
        progress: 55.2,
        targets: &[("5.5.1", "Proportion of seats held by women in national parliament")],
    },
    SdgGoalDef {
        number: 6,
        slug: "clean-water",
        title: "Clean Water and Sanitation",
        description: "Ensure availability and sustainable management of water and sanitation for all.",
        color: "#26BDE2",
        progress: 49.8,
        targets: &[("6.1.1", "Population using safely managed drinking water services")],
    },
    SdgGoalDef {
        number: 7,
        slug: "affordable-energy",
        title: "Affordable and Clean Energy",
        description: "Ensure access to affordable, reliable, sustainable and modern energy for all.",
        color: "#FCC30B",
        progress: 60.5,
        targets: &[("7.1.1", "Proportion of population with access to electricity")],
    },
    SdgGoalDef {
        number: 8,
        slug: "decent-work",
        title: "Decent Work and Economic Growth",
        description: "Promote sustained, inclusive and sustainable economic growth and decent work for all.",
        color: "#A21942",
        progress: 63.9,
        targets: &[("8.1.1", "Annual growth rate of real GDP per capita")],
    },
    SdgGoalDef {
        number: 9,
        slug: "industry-innovation",
        title: "Industry, Innovation and Infrastructure",
        description: "Build resilient infrastructure, promote inclusive and sustainable industrialization and foster innovation.",
        color: "#FD6925",
        progress: 38.6,
        targets: &[("9.c.1", "Population covered by a mobile network")],
    },
    SdgGoalDef {
        number: 10,
        slug: "reduced-inequalities",
        title: "Reduced Inequalities",
        description: "Reduce inequality within and among countries.",
        color: "#DD1367",
        progress: 41.2,
        targets: &[("10.1.1", "Growth rate of household income of the bottom 40 per cent")],
    },
    SdgGoalDef {
        number: 11,
        slug: "sustainable-cities",
        title: "Sustainable Cities and Communities",
        description: "Make cities and human settlements inclusive, safe, resilient and sustainable.",
        color: "#FD9D24",
        progress: 44.0,
        targets: &[("11.1.1", "Urban population living in slums")],
    },
    SdgGoalDef {
        number: 12,
        slug: "responsible-consumption",
        title: "Responsible Consumption and Production",
        description: "Ensure sustainable consumption and production patterns.",
        color: "#BF8B2E",
        progress: 85.1,
        targets: &[],
    },
    SdgGoalDef {
        number: 13,
        slug: "climate-action",
        title: "Climate Action",
        description: "Take urgent action to combat climate change and its impacts.",
        color: "#3F7E44",
        progress: 88.3,
        targets: &[("13.2.2", "Total greenhouse gas emissions per year")],
    },
    SdgGoalDef {
        number: 14,
        slug: "life-below-water",
        title: "Life Below Water",
        description: "Conserve and sustainably use the oceans, seas and marine resources.",
        color: "#0A97D9",
        progress: 50.4,
        targets: &[],
    },
    SdgGoalDef {
        number: 15,
        slug: "life-on-land",
        title: "Life on Land",
        description: "Protect, restore and promote sustainable use of terrestrial ecosystems and halt biodiversity loss.",
        color: "#56C02B",
        progress: 57.9,
        targets: &[("15.1.1", "Forest area as a proportion of total land area")],
    },
    SdgGoalDef {
        number: 16,
        slug: "peace-justice",
        title: "Peace, Justice and Strong Institutions",
        description: "Promote peaceful and inclusive societies and build accountable institutions at all levels.",
        color: "#00689D",
        progress: 47.5,
        targets: &[("16.9.1", "Births registered with a civil authority")],
    },
    SdgGoalDef {
        number: 17,
        slug: "partnerships",
        title: "Partnerships for the Goals",
        description: "Strengthen the means of implementation and revitalize the global partnership for sustainable development.",
        color: "#19486A",
        progress: 58.8,
        targets: &[("17.6.1", "Fixed broadband subscriptions per 100 inhabitants")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(number: i32, progress: f64) -> SdgGoal {
        SdgGoal {
            number,
            slug: format!("goal-{number}"),
            title: String::new(),
            description: String::new(),
            progress,
            color: String::new(),
            indicators: vec![],
        }
    }

    #[test]
    fn overall_score_is_rounded_mean() {
        let goals = vec![goal(1, 50.0), goal(2, 60.0), goal(3, 70.25)];
        // 180.25 / 3 = 60.0833..
        assert_eq!(overall_score(&goals), Some(60.1));
    }

    #[test]
    fn no_goals_no_score() {
        assert_eq!(overall_score(&[]), None);
    }

    #[test]
    fn catalog_covers_all_seventeen_goals_in_order() {
        let numbers: Vec<i32> = SDG_GOALS.iter().map(|g| g.number).collect();
        assert_eq!(numbers, (1..=17).collect::<Vec<_>>());
        assert!(SDG_GOALS.iter().all(|g| (0.0..=100.0).contains(&g.progress)));
    }

    #[test]
    fn catalog_score_matches_hand_computed_mean() {
        let goals: Vec<SdgGoal> = SDG_GOALS.iter().map(SdgGoalDef::to_goal).collect();
        let sum: f64 = SDG_GOALS.iter().map(|g| g.progress).sum();
        let expected = (sum / 17.0 * 10.0).round() / 10.0;
        assert_eq!(overall_score(&goals), Some(expected));
    }
}
