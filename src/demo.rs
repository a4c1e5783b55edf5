//! Step runner for the local demo.
//!
//! Every step is a function returning `Result`. The runner prints the step's
//! success lines or one failure line and moves on, so a broken step never
//! stops the ones after it. Steps that need an earlier step's output fail
//! with [`DemoError::Unavailable`] when that output is missing.

use std::io::{self, Write};

use crate::config::DemoConfig;
use crate::data::export::write_csv;
use crate::data::generate::generate_frame;
use crate::data::model::{format_counts, SampleFrame, FEATURE_NAMES};
use crate::data::split::{train_test_split, TrainTestSplit};
use crate::error::DemoError;
use crate::ml::forest::format_importances;
use crate::ml::{accuracy, ClassificationReport, LogisticModel, RandomForest};
use crate::plot::render_demo_plots;

const RULE: &str = "==================================================";

// ---------------------------------------------------------------------------
// Step bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DataOperations,
    MachineLearning,
    Visualization,
    AdvancedFeatures,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::DataOperations,
        Step::MachineLearning,
        Step::Visualization,
        Step::AdvancedFeatures,
    ];

    fn heading(self) -> &'static str {
        match self {
            Step::DataOperations => "📊 Test 1: Data Operations",
            Step::MachineLearning => "🤖 Test 2: Machine Learning",
            Step::Visualization => "📈 Test 3: Visualization",
            Step::AdvancedFeatures => "🔬 Test 4: Advanced AI Features",
        }
    }

    /// Name used in the failure line.
    fn label(self) -> &'static str {
        match self {
            Step::DataOperations => "Data operations",
            Step::MachineLearning => "Machine learning",
            Step::Visualization => "Visualization",
            Step::AdvancedFeatures => "Advanced features",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Passed,
    Failed(String),
}

/// What happened to each step, in run order.
#[derive(Debug, Clone, Default)]
pub struct DemoOutcome {
    pub steps: Vec<(Step, StepStatus)>,
}

impl DemoOutcome {
    pub fn status(&self, step: Step) -> Option<&StepStatus> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, st)| st)
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, st)| matches!(st, StepStatus::Failed(_)))
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Runs the demo steps against an output sink (stdout in the binary).
pub struct DemoRunner<W: Write> {
    config: DemoConfig,
    out: W,
    frame: Option<SampleFrame>,
    split: Option<TrainTestSplit>,
    outcome: DemoOutcome,
}

impl<W: Write> DemoRunner<W> {
    pub fn new(config: DemoConfig, out: W) -> Self {
        Self {
            config,
            out,
            frame: None,
            split: None,
            outcome: DemoOutcome::default(),
        }
    }

    /// Run all steps, then the summary. Only a failure to write to the sink
    /// is returned as an error.
    pub fn run(mut self) -> io::Result<DemoOutcome> {
        writeln!(self.out, "🚀 Rusty AI Demo - AI Developer Demo")?;
        writeln!(self.out, "{RULE}")?;

        for step in Step::ALL {
            writeln!(self.out)?;
            writeln!(self.out, "{}", step.heading())?;
            let result = match step {
                Step::DataOperations => self.data_operations(),
                Step::MachineLearning => self.machine_learning(),
                Step::Visualization => self.visualization(),
                Step::AdvancedFeatures => self.advanced_features(),
            };
            let status = match result {
                Ok(lines) => {
                    for line in lines {
                        writeln!(self.out, "{line}")?;
                    }
                    StepStatus::Passed
                }
                Err(err) => {
                    log::debug!("{} step failed: {err}", step.label());
                    writeln!(self.out, "❌ {} test failed: {err}", step.label())?;
                    StepStatus::Failed(err.to_string())
                }
            };
            self.outcome.steps.push((step, status));
        }

        self.summary()?;
        Ok(self.outcome)
    }

    fn data_operations(&mut self) -> Result<Vec<String>, DemoError> {
        // Stored first: a failed export must not hide the data from later steps.
        let frame = &*self
            .frame
            .insert(generate_frame(self.config.samples, self.config.seed));
        let mut lines = vec![
            format!("✅ Created dataset with shape: {:?}", frame.shape()),
            format!("✅ Features: {:?}", frame.columns()),
            format!(
                "✅ Target distribution: {}",
                format_counts(&frame.target_counts())
            ),
        ];

        if let Some(path) = &self.config.export_csv {
            write_csv(frame, path)?;
            lines.push(format!("✅ Exported dataset to '{}'", path.display()));
        }

        Ok(lines)
    }

    fn machine_learning(&mut self) -> Result<Vec<String>, DemoError> {
        let frame = self.frame.as_ref().ok_or(DemoError::Unavailable("dataset"))?;
        let split = train_test_split(
            &frame.features(),
            &frame.targets(),
            self.config.test_size,
            self.config.seed,
        )?;
        // Kept before fitting: the forest step needs it even if this fit fails.
        let split = &*self.split.insert(split);

        let model = LogisticModel::fit(&split.x_train, &split.y_train)?;
        let y_pred = model.predict(&split.x_test);
        let acc = accuracy(&split.y_test, &y_pred)?;

        Ok(vec![
            format!("✅ Model trained on {} samples", split.train_len()),
            format!("✅ Test set size: {} samples", split.test_len()),
            format!("✅ Model accuracy: {acc:.4}"),
        ])
    }

    fn visualization(&mut self) -> Result<Vec<String>, DemoError> {
        let frame = self.frame.as_ref().ok_or(DemoError::Unavailable("dataset"))?;
        render_demo_plots(frame, &self.config.plot_path)?;
        Ok(vec![
            "✅ Created visualization plots".to_string(),
            format!("✅ Saved plots to '{}'", self.config.plot_path.display()),
        ])
    }

    fn advanced_features(&mut self) -> Result<Vec<String>, DemoError> {
        let split = self
            .split
            .as_ref()
            .ok_or(DemoError::Unavailable("train/test split"))?;

        let forest = RandomForest::fit(
            &split.x_train,
            &split.y_train,
            self.config.n_estimators,
            self.config.seed,
        )?;
        let rf_pred = forest.predict(&split.x_test);
        let rf_accuracy = accuracy(&split.y_test, &rf_pred)?;
        let report = ClassificationReport::new(&split.y_test, &rf_pred)?;

        Ok(vec![
            format!("✅ Random Forest accuracy: {rf_accuracy:.4}"),
            format!(
                "✅ Feature importance: {}",
                format_importances(&FEATURE_NAMES, &forest.feature_importances())
            ),
            "✅ Classification Report:".to_string(),
            report.to_string(),
        ])
    }

    fn summary(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "🎯 Demo Summary")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "✅ Data manipulation with ndarray")?;
        writeln!(out, "✅ Machine Learning with linfa")?;
        writeln!(out, "✅ Data visualization with plotters")?;
        writeln!(out, "✅ Multiple ML algorithms comparison")?;
        writeln!(out, "✅ Model evaluation and metrics")?;

        writeln!(out)?;
        writeln!(out, "🏆 Capabilities Demonstrated:")?;
        writeln!(out, "  • Data Science & Analytics")?;
        writeln!(out, "  • Machine Learning Implementation")?;
        writeln!(out, "  • Model Training & Evaluation")?;
        writeln!(out, "  • Data Visualization")?;
        writeln!(out, "  • Idiomatic Rust")?;

        writeln!(out)?;
        match self.outcome.failures() {
            0 => writeln!(out, "🎉 Demo completed successfully!"),
            n => writeln!(out, "⚠️  Demo completed with {n} failed step(s)."),
        }
    }
}
