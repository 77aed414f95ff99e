//! Vehicle class categories and their expansion to concrete labels.
//!
//! Users pick from a handful of broad categories ("AC", "SLEEPER", ...), but
//! the catalog stores the operator's verbose class label on every trip. The
//! [`ClassTable`] maps each category to the labels it covers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One category and the concrete labels it expands to, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCategory {
    /// User-facing category name, e.g. "AC".
    pub name: String,

    /// Concrete class labels as stored in the catalog.
    pub labels: Vec<String>,
}

/// Static category → label table.
///
/// Categories overlap freely (a sleeper coach with air conditioning is in
/// both "AC" and "SLEEPER"); expansion takes the union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ClassCategory>", into = "Vec<ClassCategory>")]
pub struct ClassTable {
    categories: Vec<ClassCategory>,
}

impl From<Vec<ClassCategory>> for ClassTable {
    fn from(categories: Vec<ClassCategory>) -> Self {
        Self::new(categories)
    }
}

impl From<ClassTable> for Vec<ClassCategory> {
    fn from(table: ClassTable) -> Self {
        table.categories
    }
}

impl ClassTable {
    /// Build a table from categories.
    ///
    /// Category names are matched case-insensitively, so they are stored
    /// upper-cased.
    pub fn new(categories: Vec<ClassCategory>) -> Self {
        let categories = categories
            .into_iter()
            .map(|c| ClassCategory {
                name: c.name.trim().to_ascii_uppercase(),
                labels: c.labels,
            })
            .collect();
        Self { categories }
    }

    /// All categories in table order.
    pub fn categories(&self) -> &[ClassCategory] {
        &self.categories
    }

    /// Look up the labels for a single category.
    pub fn labels(&self, category: &str) -> Option<&[String]> {
        let wanted = category.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .map(|c| c.labels.as_slice())
    }

    /// Expand categories to the union of their labels.
    ///
    /// The result has no duplicates and keeps first-seen order, so the same
    /// input always yields the same output. Unknown categories contribute
    /// nothing. An empty result means "no class constraint" to the compiler.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::filter::ClassTable;
    ///
    /// let table = ClassTable::default();
    /// let labels = table.expand(["AC", "NOT_A_CATEGORY"]);
    /// assert!(labels.contains(&"A/C Sleeper (2+1)".to_string()));
    /// assert!(table.expand(Vec::<&str>::new()).is_empty());
    /// ```
    pub fn expand<'a, I>(&self, categories: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut expanded = Vec::new();

        for category in categories {
            let Some(labels) = self.labels(category) else {
                tracing::debug!(category, "ignoring unknown class category");
                continue;
            };
            for label in labels {
                if seen.insert(label.as_str()) {
                    expanded.push(label.clone());
                }
            }
        }

        expanded
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new(vec![
            category(
                "SEATER",
                &[
                    "INDRA (A.C. Seater)",
                    "A/C Seater / Sleeper (2+1)",
                    "Non A/C Seater / Sleeper (2+1)",
                    "NON A/C Seater (2+2)",
                    "Bharat Benz A/C Seater (2+2)",
                    "Super Luxury (Non AC Seater 2+2 Push Back)",
                    "LAHARI A/C SLEEPER CUM SEATER",
                ],
            ),
            category(
                "SLEEPER",
                &[
                    "STAR LINER (NON-AC SLEEPER 2+1)",
                    "A/C Sleeper (2+1)",
                    "NON A/C Sleeper (2+1)",
                    "Scania AC Multi Axle Sleeper (2+1)",
                    "Volvo Multi-Axle A/C Sleeper (2+1)",
                    "Volvo 9600 Multi-Axle A/C Sleeper (2+1)",
                    "VE A/C Sleeper (2+1)",
                    "Lahari Non A/C Sleeper Cum Seater",
                ],
            ),
            category(
                "AC",
                &[
                    "INDRA (A.C. Seater)",
                    "A/C Sleeper (2+1)",
                    "A/C Seater / Sleeper (2+1)",
                    "Scania AC Multi Axle Sleeper (2+1)",
                    "Volvo Multi-Axle A/C Sleeper (2+1)",
                    "Volvo 9600 Multi-Axle A/C Sleeper (2+1)",
                    "VE A/C Sleeper (2+1)",
                    "RAJDHANI (A.C. Semi Sleeper)",
                    "RAJADHANI AC (CONVERTED METRO LUXURY)",
                    "Rajdhani (AC Semi Sleeper 2+2)",
                    "GARUDA PLUS (VOLVO / BENZ A.C Multi Axle)",
                    "Bharat Benz A/C Sleeper (2+1)",
                    "Bharat Benz A/C Seater (2+2)",
                    "Electric A/C Seater (2+2)",
                    "Electric A/C Seater/Sleeper (2+1)",
                ],
            ),
            category(
                "NONAC",
                &[
                    "SUPER LUXURY (NON-AC, 2 + 2 PUSH BACK)",
                    "STAR LINER (NON-AC SLEEPER 2+1)",
                    "ULTRA DELUXE (NON-AC, 2+2 PUSH BACK)",
                    "NON A/C Seater / Sleeper (2+1)",
                    "NON A/C Sleeper (2+1)",
                    "NON A/C Hi-Tech (2+2)",
                    "NON A/C Hi-Tech Push Back (2+2)",
                    "NON A/C Semi Sleeper (2+2)",
                    "NON A/C Seater (2+2)",
                    "NON A/C Push Back (2+2)",
                    "Lahari Non A/C Sleeper Cum Seater",
                ],
            ),
        ])
    }
}

fn category(name: &str, labels: &[&str]) -> ClassCategory {
    ClassCategory {
        name: name.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}
