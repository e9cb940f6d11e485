mod field;

use super::view_model::ProcessFormVm;
use crate::shared::components::CardAnimated;
use contracts::domain::a001_process::fields::fields_on;
use contracts::shared::error::FormTab;
use field::FieldControl;
use leptos::prelude::*;

/// Поля одной вкладки формы
#[component]
pub fn FieldsTab(vm: ProcessFormVm, tab: FormTab) -> impl IntoView {
    view! {
        <CardAnimated class="details-section">
            <h4 class="details-section__title">{tab.title()}</h4>
            <div class="details-grid--2col">
                {fields_on(tab)
                    .into_iter()
                    .map(|field| view! { <FieldControl vm=vm field=field /> })
                    .collect_view()}
            </div>
        </CardAnimated>
    }
}
