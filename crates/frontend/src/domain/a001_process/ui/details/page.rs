//! Модальная форма процесса: вкладки полей, ошибки, сохранение

use super::super::records::RecordTabsPanel;
use super::tabs::FieldsTab;
use super::view_model::ProcessFormVm;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::shared::error::FormTab;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProcessFormModal(vm: ProcessFormVm) -> impl IntoView {
    // Мемо, чтобы ввод в поля не пересобирал разметку формы
    let ready = Memo::new(move |_| vm.state().session().is_some());
    let active_tab = Memo::new(move |_| vm.active_tab());
    let editing_id = Memo::new(move |_| vm.editing_id());

    view! {
        <Show when=move || vm.is_visible()>
            <Modal
                title=Signal::derive(move || vm.title())
                on_close=Callback::new(move |_| vm.close())
                locked=Signal::derive(move || vm.is_busy())
                footer=move || view! { <Footer vm=vm /> }
            >
                {move || if !ready.get() {
                    view! {
                        <div class="modal-loading">
                            <Spinner label="Загрузка справочников..." />
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <ErrorDisplay vm=vm />
                        <TabBar vm=vm active_tab=active_tab />
                        <div class="page__content">
                            {move || view! { <FieldsTab vm=vm tab=active_tab.get() /> }}
                        </div>
                        {move || editing_id.get().map(|id| view! {
                            <section class="details-section">
                                <h4 class="details-section__title">"Связанные записи"</h4>
                                <RecordTabsPanel process_id=id />
                            </section>
                        })}
                    }.into_any()
                }}
            </Modal>
        </Show>
    }
}

// ── Tab bar ───────────────────────────────────────────────────────────────────

#[component]
fn TabBar(vm: ProcessFormVm, active_tab: Memo<FormTab>) -> impl IntoView {
    view! {
        <div class="page__tabs">
            {FormTab::ALL
                .into_iter()
                .map(|tab| view! {
                    <button
                        class="page__tab"
                        class:page__tab--active=move || active_tab.get() == tab
                        on:click=move |_| vm.select_tab(tab)
                    >
                        {tab.title()}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

// ── Error display ─────────────────────────────────────────────────────────────

#[component]
fn ErrorDisplay(vm: ProcessFormVm) -> impl IntoView {
    view! {
        {move || vm.error().map(|e| view! {
            <div class="warning-box warning-box--error" role="alert">
                <span class="warning-box__icon">{icon("alert")}</span>
                <span class="warning-box__text">{e}</span>
            </div>
        })}
    }
}

// ── Footer ────────────────────────────────────────────────────────────────────

#[component]
fn Footer(vm: ProcessFormVm) -> impl IntoView {
    let busy = Signal::derive(move || vm.is_busy());
    let ready = Signal::derive(move || vm.state().session().is_some());

    view! {
        <Button
            appearance=ButtonAppearance::Secondary
            on_click=move |_| vm.close()
            disabled=busy
        >
            "Отмена"
        </Button>
        <Button
            appearance=ButtonAppearance::Primary
            on_click=move |_| vm.submit()
            disabled=Signal::derive(move || busy.get() || !ready.get())
        >
            {move || if busy.get() {
                view! { <Spinner size=SpinnerSize::Tiny /> " Сохранение..." }.into_any()
            } else {
                view! { {icon("save")} " Сохранить" }.into_any()
            }}
        </Button>
    }
}
