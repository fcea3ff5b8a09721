use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};

use tabstat::ui::{render_grid, summary_panel, Summary};
use tabstat::{LoadOptions, TabularDataModel};

// ---------------------------------------------------------------------------
// Terminal viewer: owns a model and re-renders when it changes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub struct ViewerApp {
    pub model: TabularDataModel,
    /// Set by the change signal; cleared once the view has been redrawn.
    stale: Rc<Cell<bool>>,
    max_rows: usize,
}

impl ViewerApp {
    pub fn new(options: LoadOptions, max_rows: usize) -> Self {
        let mut model = TabularDataModel::with_options(options);
        let stale = Rc::new(Cell::new(false));

        let flag = Rc::clone(&stale);
        model.subscribe(move || {
            log::debug!("model changed, view marked stale");
            flag.set(true);
        });

        Self {
            model,
            stale,
            max_rows,
        }
    }

    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.model.set_source(path)?;
        Ok(())
    }

    /// Redraw if the model changed since the last call.
    pub fn render(&mut self, format: OutputFormat) -> Result<Option<String>> {
        if !self.stale.replace(false) {
            return Ok(None);
        }

        let text = match format {
            OutputFormat::Table => {
                let mut out = render_grid(&self.model, self.max_rows);
                out.push('\n');
                out.push_str(&summary_panel(&self.model));
                out
            }
            OutputFormat::Json => {
                let summary = Summary::from_model(&self.model);
                serde_json::to_string_pretty(&summary).context("serializing summary")?
            }
        };
        Ok(Some(text))
    }
}
