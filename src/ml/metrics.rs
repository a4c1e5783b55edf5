use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array1;

use crate::error::DemoError;

fn check_lengths(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> Result<(), DemoError> {
    if y_true.len() != y_pred.len() {
        return Err(DemoError::LengthMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    Ok(())
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Fraction of positions where prediction equals truth. Empty input is 0.
pub fn accuracy(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> Result<f64, DemoError> {
    check_lengths(y_true, y_pred)?;
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(ratio(hits as f64, y_true.len() as f64))
}

// ---------------------------------------------------------------------------
// Classification report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Averages {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-class precision/recall/f1 plus accuracy, macro and weighted averages.
///
/// Labels are the union of those seen in truth and prediction. Any metric
/// whose denominator is zero is reported as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: Averages,
    pub weighted_avg: Averages,
    pub total_support: usize,
}

impl ClassificationReport {
    pub fn new(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> Result<Self, DemoError> {
        check_lengths(y_true, y_pred)?;

        let labels: BTreeSet<usize> = y_true.iter().chain(y_pred.iter()).copied().collect();
        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|label| {
                let mut tp = 0usize;
                let mut predicted = 0usize;
                let mut support = 0usize;
                for (&t, &p) in y_true.iter().zip(y_pred) {
                    if p == label {
                        predicted += 1;
                    }
                    if t == label {
                        support += 1;
                        if p == label {
                            tp += 1;
                        }
                    }
                }
                let precision = ratio(tp as f64, predicted as f64);
                let recall = ratio(tp as f64, support as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let total_support = y_true.len();
        let n_classes = classes.len() as f64;
        let macro_avg = Averages {
            precision: ratio(classes.iter().map(|c| c.precision).sum(), n_classes),
            recall: ratio(classes.iter().map(|c| c.recall).sum(), n_classes),
            f1: ratio(classes.iter().map(|c| c.f1).sum(), n_classes),
        };
        let weight = |f: fn(&ClassMetrics) -> f64| {
            ratio(
                classes.iter().map(|c| f(c) * c.support as f64).sum(),
                total_support as f64,
            )
        };
        let weighted_avg = Averages {
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1: weight(|c| c.f1),
        };

        Ok(Self {
            accuracy: accuracy(y_true, y_pred)?,
            classes,
            macro_avg,
            weighted_avg,
            total_support,
        })
    }
}

const HEADERS: [&str; 4] = ["precision", "recall", "f1-score", "support"];
const LAST_ROW_HEADING: &str = "weighted avg";

/// Right-aligned table, two decimals.
impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.to_string().len())
            .chain(std::iter::once(LAST_ROW_HEADING.len()))
            .max()
            .unwrap_or(LAST_ROW_HEADING.len());

        write!(f, "{:>width$} ", "")?;
        for header in HEADERS {
            write!(f, " {header:>9}")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        let row = |f: &mut fmt::Formatter<'_>, name: &str, p: f64, r: f64, f1: f64, support: usize| {
            writeln!(f, "{name:>width$}  {p:>9.2} {r:>9.2} {f1:>9.2} {support:>9}")
        };

        for class in &self.classes {
            row(f, &class.label.to_string(), class.precision, class.recall, class.f1, class.support)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        row(
            f,
            "macro avg",
            self.macro_avg.precision,
            self.macro_avg.recall,
            self.macro_avg.f1,
            self.total_support,
        )?;
        row(
            f,
            LAST_ROW_HEADING,
            self.weighted_avg.precision,
            self.weighted_avg.recall,
            self.weighted_avg.f1,
            self.total_support,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accuracy_is_hit_ratio() {
        let t = array![0, 1, 1, 0, 1];
        let p = array![0, 1, 0, 0, 0];
        assert!((accuracy(&t, &p).unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(accuracy(&array![], &array![]).unwrap(), 0.0);
        assert!(accuracy(&t, &array![0]).is_err());
    }

    #[test]
    fn per_class_metrics() {
        let t = array![0, 0, 0, 1, 1];
        let p = array![0, 0, 1, 1, 0];
        let report = ClassificationReport::new(&t, &p).unwrap();

        let zero = &report.classes[0];
        assert_eq!(zero.support, 3);
        assert!((zero.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((zero.recall - 2.0 / 3.0).abs() < 1e-12);

        let one = &report.classes[1];
        assert_eq!(one.support, 2);
        assert!((one.precision - 0.5).abs() < 1e-12);
        assert!((one.recall - 0.5).abs() < 1e-12);

        assert!((report.accuracy - 0.6).abs() < 1e-12);
        assert!((report.macro_avg.recall - (2.0 / 3.0 + 0.5) / 2.0).abs() < 1e-12);
        assert!((report.weighted_avg.recall - report.accuracy).abs() < 1e-12);
    }

    #[test]
    fn never_predicted_class_scores_zero() {
        let t = array![0, 1, 1];
        let p = array![0, 0, 0];
        let report = ClassificationReport::new(&t, &p).unwrap();
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1, 0.0);
    }

    #[test]
    fn renders_table_layout() {
        let t = array![0, 0, 1, 1];
        let p = array![0, 1, 1, 1];
        let text = ClassificationReport::new(&t, &p).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "              precision    recall  f1-score   support");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "           0       1.00      0.50      0.67         2");
        assert_eq!(lines[3], "           1       0.67      1.00      0.80         2");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "    accuracy                           0.75         4");
        assert_eq!(lines[6], "   macro avg       0.83      0.75      0.73         4");
        assert_eq!(lines[7], "weighted avg       0.83      0.75      0.73         4");
    }
}
