//! Fixed subject/module/topic/subtopic/microtopic classification tree used by
//! the cascading filter endpoints. The table is immutable and lives in the
//! binary; lookups are pure functions over it.

pub struct SubjectNode {
    pub name: &'static str,
    pub modules: &'static [ModuleNode],
}

pub struct ModuleNode {
    pub name: &'static str,
    pub topics: &'static [TopicNode],
}

pub struct TopicNode {
    pub name: &'static str,
    pub subtopics: &'static [SubtopicNode],
}

pub struct SubtopicNode {
    pub name: &'static str,
    pub microtopics: &'static [&'static str],
}

pub const QUESTION_TYPES: &[&str] = &["Objective", "Subjective"];

pub fn subjects() -> Vec<&'static str> {
    HIERARCHY.iter().map(|subject| subject.name).collect()
}

pub fn modules(subject: &str) -> Vec<&'static str> {
    subject_node(subject)
        .map(|node| node.modules.iter().map(|module| module.name).collect())
        .unwrap_or_default()
}

pub fn topics(subject: &str, module: &str) -> Vec<&'static str> {
    subject_node(subject)
        .and_then(|node| node.modules.iter().find(|m| m.name == module))
        .map(|module| module.topics.iter().map(|topic| topic.name).collect())
        .unwrap_or_default()
}

pub fn subtopics(subject: &str, module: &str, topic: &str) -> Vec<&'static str> {
    subject_node(subject)
        .and_then(|node| node.modules.iter().find(|m| m.name == module))
        .and_then(|module| module.topics.iter().find(|t| t.name == topic))
        .map(|topic| topic.subtopics.iter().map(|st| st.name).collect())
        .unwrap_or_default()
}

/// Microtopics for a (subject, topic, subtopic) path, merged across every
/// module that carries the topic. A subtopic may repeat between modules, so
/// results are deduplicated in first-occurrence order.
pub fn microtopics(subject: &str, topic: &str, subtopic: &str) -> Vec<&'static str> {
    let Some(node) = subject_node(subject) else {
        return Vec::new();
    };

    let mut seen = Vec::new();
    for module in node.modules {
        for t in module.topics.iter().filter(|t| t.name == topic) {
            for st in t.subtopics.iter().filter(|st| st.name == subtopic) {
                for micro in st.microtopics {
                    if !seen.contains(micro) {
                        seen.push(micro);
                    }
                }
            }
        }
    }
    seen
}

pub fn question_types() -> Vec<&'static str> {
    QUESTION_TYPES.to_vec()
}

fn subject_node(subject: &str) -> Option<&'static SubjectNode> {
    HIERARCHY.iter().find(|node| node.name == subject)
}

const fn leaf(name: &'static str) -> SubtopicNode {
    SubtopicNode {
        name,
        microtopics: &[],
    }
}

static HIERARCHY: &[SubjectNode] = &[
    SubjectNode {
        name: "Economics",
        modules: &[
            ModuleNode {
                name: "Module_1",
                topics: &[
                    TopicNode {
                        name: "Introduction to Economics",
                        subtopics: &[
                            SubtopicNode {
                                name: "Concept of Demand",
                                microtopics: &["Law of Demand", "Demand Elasticity"],
                            },
                            SubtopicNode {
                                name: "Concept of Supply",
                                microtopics: &["Law of Supply"],
                            },
                            leaf("Sectors of Economy"),
                            leaf("Basics"),
                        ],
                    },
                    TopicNode {
                        name: "Inclusive Growth",
                        subtopics: &[
                            leaf("Economic Growth"),
                            leaf("Measures for Inclusive Growth"),
                            leaf("Sustainable Development"),
                            leaf("Growth Vs Development"),
                            leaf("Government Schemes"),
                            leaf("Financial Inclusion Schemes"),
                        ],
                    },
                    TopicNode {
                        name: "Planning in India",
                        subtopics: &[
                            leaf("1991 Economic Crisis"),
                            leaf("Different Types of Planning"),
                            leaf("Five year Plans"),
                            leaf("Infrastructure"),
                            leaf("Import Substitution"),
                        ],
                    },
                ],
            },
            ModuleNode {
                name: "Module_2",
                topics: &[
                    TopicNode {
                        name: "National Income",
                        subtopics: &[
                            SubtopicNode {
                                name: "Concept of GDP and GNP",
                                microtopics: &["GDP at Market Price", "GDP at Factor Cost"],
                            },
                            leaf("Concept of National Income"),
                            leaf("Gross Value Added(GVA)"),
                            leaf("Purchasing Power Parity"),
                            leaf("Demographic Dividend"),
                        ],
                    },
                    TopicNode {
                        name: "Balance of Payments",
                        subtopics: &[
                            leaf("Balance of Payment Concept"),
                            leaf("Current Account and Capital Accounts"),
                            leaf("Foreign Trade"),
                            leaf("Balance of Trade"),
                            leaf("FDI, FII in Indian context"),
                        ],
                    },
                    TopicNode {
                        name: "Foreign Exchange Rates",
                        subtopics: &[
                            leaf("Foreign Exchange Reserves"),
                            leaf("Foreign Exchange Rates"),
                        ],
                    },
                ],
            },
            ModuleNode {
                name: "Module_4",
                topics: &[
                    TopicNode {
                        name: "Fiscal Policy",
                        subtopics: &[
                            leaf("Taxation in India"),
                            leaf("Union Budget"),
                            leaf("Public debt"),
                            leaf("Fiscal Consolidation"),
                            leaf("FRBM Act"),
                        ],
                    },
                    TopicNode {
                        name: "Inflation",
                        subtopics: &[
                            leaf("Disinflation"),
                            leaf("Inflation-Effects"),
                            leaf("Inflation-Measurement in India"),
                            leaf("Philips Curve"),
                            leaf("Stagflation"),
                        ],
                    },
                ],
            },
        ],
    },
    SubjectNode {
        name: "History",
        modules: &[
            ModuleNode {
                name: "Ancient History and Culture_1",
                topics: &[TopicNode {
                    name: "Ancient History",
                    subtopics: &[
                        SubtopicNode {
                            name: "Indus valley civilization",
                            microtopics: &["Town Planning", "Harappan Script"],
                        },
                        SubtopicNode {
                            name: "Mauryan Empire",
                            microtopics: &["Ashokan Edicts"],
                        },
                        leaf("Vedic Period"),
                        leaf("Gupta Period"),
                        leaf("Mahajanapadas"),
                    ],
                }],
            },
            ModuleNode {
                name: "Ancient History and Culture_2",
                topics: &[TopicNode {
                    name: "Ancient History",
                    subtopics: &[
                        SubtopicNode {
                            name: "Mauryan Empire",
                            // Repeats a Module_1 microtopic on purpose; the
                            // lookup must collapse it.
                            microtopics: &["Ashokan Edicts", "Mauryan Administration"],
                        },
                        leaf("Post Mauryan Period"),
                        leaf("Sangam Age"),
                        leaf("Art and Architecture"),
                    ],
                }],
            },
            ModuleNode {
                name: "Medieval History",
                topics: &[TopicNode {
                    name: "Medieval India",
                    subtopics: &[
                        leaf("Delhi Sultanate"),
                        leaf("Mughal Empire"),
                        leaf("Vijayanagara Empire"),
                        leaf("Bhakti and Sufi Movements"),
                    ],
                }],
            },
            ModuleNode {
                name: "Modern History_1",
                topics: &[TopicNode {
                    name: "Modern India",
                    subtopics: &[
                        leaf("British Expansion"),
                        leaf("Revolt of 1857"),
                        leaf("Indian National Movement"),
                    ],
                }],
            },
        ],
    },
    SubjectNode {
        name: "Geography",
        modules: &[
            ModuleNode {
                name: "Indian Geography_1",
                topics: &[TopicNode {
                    name: "Indian Location and Setting",
                    subtopics: &[
                        leaf("Location,Size and Time Zone"),
                        leaf("Northern Mountains/Himalayas"),
                        leaf("Great plains-Indo- Gangetic plains"),
                        leaf("Coastal Plains & Islands"),
                        leaf("Peninsular Pleateau"),
                    ],
                }],
            },
            ModuleNode {
                name: "Physical Geography_1",
                topics: &[TopicNode {
                    name: "Geomorphology",
                    subtopics: &[
                        leaf("Earth Interior"),
                        leaf("Plate Tectonics"),
                        leaf("Volcanism"),
                        leaf("Earthquakes"),
                    ],
                }],
            },
        ],
    },
    SubjectNode {
        name: "Polity and Governance",
        modules: &[
            ModuleNode {
                name: "Module_1",
                topics: &[TopicNode {
                    name: "Constitutional Framework",
                    subtopics: &[
                        leaf("Making of the Constitution"),
                        leaf("Preamble"),
                        leaf("Fundamental Rights"),
                        leaf("Directive Principles"),
                    ],
                }],
            },
            ModuleNode {
                name: "Module_2",
                topics: &[TopicNode {
                    name: "Union Government",
                    subtopics: &[
                        leaf("President"),
                        leaf("Parliament"),
                        leaf("Supreme Court"),
                    ],
                }],
            },
        ],
    },
    SubjectNode {
        name: "Science and Technology",
        modules: &[ModuleNode {
            name: "Module_1",
            topics: &[TopicNode {
                name: "Biotechnology",
                subtopics: &[
                    leaf("Genetic Engineering"),
                    leaf("Vaccines"),
                    leaf("Gene Editing"),
                ],
            }],
        }],
    },
    SubjectNode {
        name: "Ecology and Environment",
        modules: &[ModuleNode {
            name: "Module_1",
            topics: &[TopicNode {
                name: "Ecosystems",
                subtopics: &[
                    leaf("Food Chains"),
                    leaf("Biodiversity"),
                    leaf("Wetlands"),
                ],
            }],
        }],
    },
];

#[cfg(test)]
mod tests {
    use super::{microtopics, modules, question_types, subjects, subtopics, topics};

    #[test]
    fn lists_all_subjects() {
        let subjects = subjects();
        assert!(subjects.contains(&"Economics"));
        assert!(subjects.contains(&"History"));
        assert_eq!(subjects.len(), 6);
    }

    #[test]
    fn modules_for_known_subject() {
        let modules = modules("History");
        assert!(modules.contains(&"Ancient History and Culture_1"));
        assert!(modules.contains(&"Medieval History"));
    }

    #[test]
    fn modules_for_unknown_subject_is_empty() {
        assert!(modules("Astrology").is_empty());
    }

    #[test]
    fn topics_are_exactly_the_nested_names_without_duplicates() {
        let topics = topics("Economics", "Module_2");
        assert_eq!(
            topics,
            vec![
                "National Income",
                "Balance of Payments",
                "Foreign Exchange Rates"
            ]
        );
    }

    #[test]
    fn topics_for_unknown_module_is_empty() {
        assert!(topics("Economics", "Module_99").is_empty());
    }

    #[test]
    fn subtopics_follow_the_full_path() {
        let subtopics = subtopics("Economics", "Module_4", "Inflation");
        assert!(subtopics.contains(&"Stagflation"));
        assert!(!subtopics.contains(&"Union Budget"));
    }

    #[test]
    fn subtopics_with_wrong_topic_is_empty() {
        assert!(subtopics("Economics", "Module_4", "National Income").is_empty());
    }

    #[test]
    fn microtopics_merge_across_modules_and_deduplicate() {
        let micro = microtopics("History", "Ancient History", "Mauryan Empire");
        assert_eq!(micro, vec!["Ashokan Edicts", "Mauryan Administration"]);
    }

    #[test]
    fn microtopics_for_plain_subtopic_is_empty() {
        assert!(microtopics("History", "Ancient History", "Vedic Period").is_empty());
    }

    #[test]
    fn question_types_are_fixed() {
        assert_eq!(question_types(), vec!["Objective", "Subjective"]);
    }
}
