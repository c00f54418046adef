//! Fans items out to every configured output driver.

use crate::archive::JsonArchiveWriter;
use crate::config::{DriverConfig, OutputFormat, PagedOptions};
use crate::error::OutputError;
use crate::paged::{JsonPageSink, PagedDriver};
use std::sync::Arc;
use tabula_csv::{CsvDriver, CsvOptions};
use tabula_layout::{OutputItem, SharedItem};
use tabula_render_core::{ArchiveDriver, OutputDriver};

/// Creates the driver a config describes.
pub fn create_driver(config: &DriverConfig) -> Result<Box<dyn OutputDriver>, OutputError> {
    let name = config.path.display().to_string();
    let driver: Box<dyn OutputDriver> = match config.format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            let mut options: CsvOptions = config.options()?;
            if config.format == OutputFormat::Tsv && !config.options.contains_key("separator") {
                options.separator = "\t".to_string();
            }
            Box::new(CsvDriver::create(&config.path, options)?)
        }
        OutputFormat::Pages => {
            let options: PagedOptions = config.options()?;
            let sink = JsonPageSink::create(&config.path, options.pretty)?;
            Box::new(PagedDriver::new(name, &options, sink))
        }
        OutputFormat::Archive => {
            Box::new(ArchiveDriver::new(name, JsonArchiveWriter::create(&config.path)?))
        }
    };
    log::debug!("created {:?} driver {}", config.format, driver.name());
    Ok(driver)
}

/// Submits every item to every driver. A driver that fails is reported
/// and dropped; the others carry on.
#[derive(Default)]
pub struct OutputEngine {
    drivers: Vec<Box<dyn OutputDriver>>,
}

impl OutputEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver per config, skipping the ones that fail.
    pub fn from_configs(configs: &[DriverConfig]) -> Self {
        let mut engine = Self::new();
        for config in configs {
            match create_driver(config) {
                Ok(driver) => engine.add_driver(driver),
                Err(err) => log::error!("cannot create output {}: {err}", config.path.display()),
            }
        }
        engine
    }

    pub fn add_driver(&mut self, driver: Box<dyn OutputDriver>) {
        self.drivers.push(driver);
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn submit(&mut self, item: OutputItem) {
        self.submit_shared(Arc::new(item));
    }

    /// Submits `item`, then releases it if no one else holds it.
    pub fn submit_shared(&mut self, item: SharedItem) {
        self.drivers.retain_mut(|driver| match driver.submit(&item) {
            Ok(()) => true,
            Err(err) => {
                log::error!("{}: {err}; dropping this output", driver.name());
                false
            }
        });
        if let Ok(item) = Arc::try_unwrap(item) {
            item.release();
        }
    }

    pub fn flush(&mut self) {
        self.drivers.retain_mut(|driver| match driver.flush() {
            Ok(()) => true,
            Err(err) => {
                log::error!("{}: flush failed: {err}; dropping this output", driver.name());
                false
            }
        });
    }

    /// Finishes every driver. Returns the first error after trying all.
    pub fn finish(self) -> Result<(), OutputError> {
        let mut first = None;
        for mut driver in self.drivers {
            if let Err(err) = driver.finish() {
                log::error!("{}: {err}", driver.name());
                first.get_or_insert(err);
            }
        }
        match first {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tabula_layout::TextKind;
    use tabula_render_core::RenderError;

    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        fail_on: Option<usize>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl OutputDriver for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn submit(&mut self, item: &SharedItem) -> Result<(), RenderError> {
            let mut seen = self.seen.borrow_mut();
            if self.fail_on == Some(seen.len()) {
                return Err(RenderError::from("disk full"));
            }
            seen.push(item.kind_name().to_string());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), RenderError> {
            self.seen.borrow_mut().push("finish".into());
            Ok(())
        }
    }

    #[test]
    fn failing_driver_is_dropped_alone() {
        let good = Rc::new(RefCell::new(Vec::new()));
        let bad = Rc::new(RefCell::new(Vec::new()));
        let mut engine = OutputEngine::new();
        engine.add_driver(Box::new(Probe { name: "good", fail_on: None, seen: good.clone() }));
        engine.add_driver(Box::new(Probe { name: "bad", fail_on: Some(1), seen: bad.clone() }));

        engine.submit(OutputItem::text(TextKind::Log, "a"));
        engine.submit(OutputItem::PageBreak);
        assert_eq!(engine.driver_count(), 1);
        engine.submit(OutputItem::text(TextKind::Log, "b"));
        engine.finish().unwrap();

        assert_eq!(*good.borrow(), ["text", "page break", "text", "finish"]);
        assert_eq!(*bad.borrow(), ["text"]);
    }

    #[test]
    fn unopenable_outputs_are_skipped() {
        let config = DriverConfig::new("/nonexistent/dir/out.csv", None, &[]).unwrap();
        let engine = OutputEngine::from_configs(&[config]);
        assert_eq!(engine.driver_count(), 0);
    }
}
