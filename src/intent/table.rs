//! Ordered catalogue of recognizable intents.
//!
//! Rules are evaluated strictly in table order and the first match wins;
//! rules are not disjoint (e.g. "search" also matches inside longer
//! sentences), so order is part of the contract.

use regex::Regex;

/// Applications the assistant can open and close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppTarget {
    Notepad,
    Chrome,
    Calculator,
}

impl AppTarget {
    /// Display name used in replies ("Opening Notepad.")
    pub fn label(&self) -> &'static str {
        match self {
            AppTarget::Notepad => "Notepad",
            AppTarget::Chrome => "Chrome",
            AppTarget::Calculator => "Calculator",
        }
    }

    /// Lowercase substring matched against live process names
    pub fn process_needle(&self) -> &'static str {
        match self {
            AppTarget::Notepad => "notepad",
            AppTarget::Chrome => "chrome",
            AppTarget::Calculator => "calculator",
        }
    }
}

/// A recognized request category, bound to a handler at resolver wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    StopListening,
    OpenApp(AppTarget),
    CloseApp(AppTarget),
    CurrentTime,
    Weather,
    Search,
}

/// Trigger condition for a rule. Predicates are pure functions of the
/// utterance string.
enum Trigger {
    /// Utterance contains the keyword
    Substring(&'static str),
    /// Utterance contains the keyword; a capture group extracts an argument.
    /// The rule matches on the keyword alone - a missing or blank capture is
    /// the bound handler's problem, not a table rejection.
    Captured {
        keyword: &'static str,
        extractor: Regex,
    },
}

pub struct PatternRule {
    trigger: Trigger,
    intent: Intent,
}

/// Outcome of a successful table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub intent: Intent,
    /// Extracted argument (e.g. a city name), trimmed; passed through to the
    /// handler opaquely
    pub capture: Option<String>,
}

pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    /// The fixed catalogue, in precedence order:
    /// hello, stop the process, open notepad, current time, current weather,
    /// close notepad, open chrome, close chrome, open calculator,
    /// close calculator, search.
    pub fn default_catalogue() -> Self {
        let weather_extractor =
            Regex::new(r"current weather in ([a-zA-Z\s]+)").expect("static regex");

        let rules = vec![
            PatternRule {
                trigger: Trigger::Substring("hello"),
                intent: Intent::Greeting,
            },
            PatternRule {
                trigger: Trigger::Substring("stop the process"),
                intent: Intent::StopListening,
            },
            PatternRule {
                trigger: Trigger::Substring("open notepad"),
                intent: Intent::OpenApp(AppTarget::Notepad),
            },
            PatternRule {
                trigger: Trigger::Substring("current time"),
                intent: Intent::CurrentTime,
            },
            PatternRule {
                trigger: Trigger::Captured {
                    keyword: "current weather",
                    extractor: weather_extractor,
                },
                intent: Intent::Weather,
            },
            PatternRule {
                trigger: Trigger::Substring("close notepad"),
                intent: Intent::CloseApp(AppTarget::Notepad),
            },
            PatternRule {
                trigger: Trigger::Substring("open chrome"),
                intent: Intent::OpenApp(AppTarget::Chrome),
            },
            PatternRule {
                trigger: Trigger::Substring("close chrome"),
                intent: Intent::CloseApp(AppTarget::Chrome),
            },
            PatternRule {
                trigger: Trigger::Substring("open calculator"),
                intent: Intent::OpenApp(AppTarget::Calculator),
            },
            PatternRule {
                trigger: Trigger::Substring("close calculator"),
                intent: Intent::CloseApp(AppTarget::Calculator),
            },
            PatternRule {
                trigger: Trigger::Substring("search"),
                intent: Intent::Search,
            },
        ];

        Self { rules }
    }

    /// First rule whose trigger succeeds, or None (distinct from any handler
    /// failure - None routes to the fallback).
    pub fn match_utterance(&self, utterance: &str) -> Option<RuleMatch> {
        for rule in &self.rules {
            match &rule.trigger {
                Trigger::Substring(keyword) => {
                    if utterance.contains(keyword) {
                        return Some(RuleMatch {
                            intent: rule.intent,
                            capture: None,
                        });
                    }
                }
                Trigger::Captured { keyword, extractor } => {
                    if utterance.contains(keyword) {
                        let capture = extractor
                            .captures(utterance)
                            .and_then(|c| c.get(1))
                            .map(|m| m.as_str().trim().to_string());
                        return Some(RuleMatch {
                            intent: rule.intent,
                            capture,
                        });
                    }
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::default_catalogue()
    }
}
