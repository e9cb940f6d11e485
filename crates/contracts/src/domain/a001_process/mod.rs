pub mod controller;
pub mod dependent;
pub mod fields;
pub mod form;
pub mod list_store;
pub mod tabs;

use crate::shared::reference_cache::ReferenceCache;
use crate::shared::report_source::ReportSource;
use crate::system::{ConsoleConfig, SessionContext};
use controller::ProcessFormController;
use list_store::ProcessListStore;
use std::rc::Rc;
use tabs::TabDataController;

/// Все контроллеры консоли поверх одного источника данных
pub struct ProcessConsole {
    pub session: SessionContext,
    pub config: ConsoleConfig,
    pub references: Rc<ReferenceCache>,
    pub list: Rc<ProcessListStore>,
    pub form: ProcessFormController,
    pub tabs: TabDataController,
}

impl ProcessConsole {
    pub fn new(session: SessionContext, config: ConsoleConfig, source: Rc<dyn ReportSource>) -> Self {
        let references = Rc::new(ReferenceCache::new(Rc::clone(&source)));
        let list = Rc::new(ProcessListStore::new(
            Rc::clone(&source),
            config.process_report.as_str(),
            config.page_size,
        ));
        let form = ProcessFormController::new(
            session.clone(),
            config.clone(),
            Rc::clone(&source),
            Rc::clone(&references),
            Rc::clone(&list),
        );
        let tabs = TabDataController::new(source, config.tab_page_size, config.tab_cache_capacity);

        Self {
            session,
            config,
            references,
            list,
            form,
            tabs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ConsoleResult;
    use crate::shared::record::Record;
    use crate::shared::report_source::{ReportQuery, SubmitTarget, WireForm};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeSource {
        reports: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ReportSource for FakeSource {
        async fn fetch_report(&self, query: &ReportQuery) -> ConsoleResult<Vec<Record>> {
            self.reports.borrow_mut().push(query.report.clone());
            if query.report == "480" {
                return Ok(vec![json!({"ПроцессID": "1", "Процесс": "Учёт"})
                    .as_object()
                    .cloned()
                    .unwrap()]);
            }
            Ok(Vec::new())
        }

        async fn submit_record(&self, _: &SubmitTarget, _: &WireForm) -> ConsoleResult<serde_json::Value> {
            Ok(json!({}))
        }
    }

    #[test]
    fn test_references_loaded_on_first_form_open() {
        let source = Rc::new(FakeSource::default());
        let console = ProcessConsole::new(
            SessionContext::new("417", "pdn", "tok"),
            ConsoleConfig::default(),
            source.clone(),
        );

        assert_eq!(block_on(console.list.load()), Ok(1));
        assert!(!console.references.is_loaded());
        assert_eq!(*source.reports.borrow(), vec!["480".to_string()]);

        block_on(console.form.open_create());
        assert!(console.references.is_loaded());
        assert_eq!(source.reports.borrow().len(), fields::reference_names().len() + 1);

        block_on(console.form.open_create());
        assert_eq!(source.reports.borrow().len(), fields::reference_names().len() + 1);
    }
}
