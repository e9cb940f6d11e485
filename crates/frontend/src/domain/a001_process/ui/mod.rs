//! UI реестра процессов
//!
//! - list: сетка карточек, поиск, страницы
//! - details: модальная форма процесса (MVVM)
//! - records: вкладки связанных записей

pub mod details;
pub mod list;
pub mod records;

use contracts::domain::a001_process::ProcessConsole;
use leptos::prelude::*;
use std::rc::Rc;

/// Доступ к контроллерам консоли из компонентов.
///
/// Контроллеры живут вне реактивной системы; после каждого изменения их
/// состояния вызывается `touch`, и производные сигналы пересчитываются.
#[derive(Clone, Copy)]
pub struct ConsoleHandle {
    console: StoredValue<Rc<ProcessConsole>, LocalStorage>,
    revision: RwSignal<u64>,
}

impl ConsoleHandle {
    pub fn new(console: ProcessConsole) -> Self {
        Self {
            console: StoredValue::new_local(Rc::new(console)),
            revision: RwSignal::new(0),
        }
    }

    pub fn get(&self) -> Rc<ProcessConsole> {
        self.console.get_value()
    }

    /// Подписка на изменения состояния контроллеров
    pub fn track(&self) {
        self.revision.track();
    }

    pub fn touch(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Прочитать состояние контроллеров с подпиской на изменения
    pub fn read<T>(&self, f: impl FnOnce(&ProcessConsole) -> T) -> T {
        self.track();
        let console = self.get();
        f(&console)
    }
}

pub fn use_console() -> ConsoleHandle {
    use_context::<ConsoleHandle>().expect("ConsoleHandle not found in context")
}
