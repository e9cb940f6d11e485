use super::reference::ReferenceBook;
use super::report_source::{ReportQuery, ReportSource};
use futures::future::join_all;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Кэш справочников на время сессии.
///
/// Загружается одним пакетом: по запросу на каждое имя параллельно, готовность
/// выставляется только когда завершились все. Ошибка по отдельному имени даёт
/// пустой набор для этого имени и не прерывает загрузку.
pub struct ReferenceCache {
    source: Rc<dyn ReportSource>,
    book: RefCell<ReferenceBook>,
    loaded: Cell<bool>,
}

impl ReferenceCache {
    pub fn new(source: Rc<dyn ReportSource>) -> Self {
        Self {
            source,
            book: RefCell::new(ReferenceBook::new()),
            loaded: Cell::new(false),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn book(&self) -> Ref<'_, ReferenceBook> {
        self.book.borrow()
    }

    pub async fn ensure_loaded(&self, names: &[&str]) {
        if self.loaded.get() {
            return;
        }

        log::debug!("Загрузка справочников: {}", names.len());

        let requests = names.iter().map(|name| {
            let source = Rc::clone(&self.source);
            let query = ReportQuery::new(*name);
            async move {
                let result = source.fetch_report(&query).await;
                (query.report, result)
            }
        });
        let results = join_all(requests).await;

        let mut book = self.book.borrow_mut();
        for (name, result) in results {
            let items = match result {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("Справочник '{}' не загружен: {}", name, e);
                    Vec::new()
                }
            };
            book.insert(name, items);
        }
        self.loaded.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::{ConsoleError, ConsoleResult};
    use crate::shared::record::Record;
    use crate::shared::report_source::{SubmitTarget, WireForm};
    use async_trait::async_trait;
    use futures::executor::block_on;

    struct FakeSource {
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ReportSource for FakeSource {
        async fn fetch_report(&self, query: &ReportQuery) -> ConsoleResult<Vec<Record>> {
            self.calls.set(self.calls.get() + 1);
            match query.report.as_str() {
                "Группа" => Err(ConsoleError::http(500, "Internal Server Error")),
                name => {
                    let text = format!(r#"[{{"{name}ID": "1", "{name}": "{name} 1"}}]"#);
                    Ok(serde_json::from_str(&text).unwrap())
                }
            }
        }

        async fn submit_record(
            &self,
            _target: &SubmitTarget,
            _form: &WireForm,
        ) -> ConsoleResult<serde_json::Value> {
            unreachable!()
        }
    }

    #[test]
    fn test_partial_failure_degrades_to_empty() {
        let source = Rc::new(FakeSource { calls: Cell::new(0) });
        let cache = ReferenceCache::new(source.clone());

        block_on(cache.ensure_loaded(&["Статус", "Группа", "ИС"]));

        assert!(cache.is_loaded());
        let book = cache.book();
        assert_eq!(book.len(), 3);
        assert!(book.contains("Группа"));
        assert!(book.items("Группа").is_empty());
        assert_eq!(book.resolve_label("ИС", "1"), Some("ИС 1".to_string()));
    }

    #[test]
    fn test_loaded_once_per_session() {
        let source = Rc::new(FakeSource { calls: Cell::new(0) });
        let cache = ReferenceCache::new(source.clone());

        block_on(cache.ensure_loaded(&["Статус", "ИС"]));
        block_on(cache.ensure_loaded(&["Статус", "ИС"]));

        assert_eq!(source.calls.get(), 2);
    }
}
