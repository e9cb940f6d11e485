use super::super::view_model::ProcessFormVm;
use crate::shared::components::ui::{CheckboxGroup, Input, Select, Textarea};
use contracts::domain::a001_process::fields::ProcessField;
use leptos::prelude::*;

/// Элемент ввода для поля процесса
#[component]
pub fn FieldControl(vm: ProcessFormVm, field: ProcessField) -> impl IntoView {
    let id = format!("process-{}", field.wire_key());
    let label = field.caption().to_string();
    let value = Signal::derive(move || vm.value(field));
    let disabled = Signal::derive(move || vm.is_busy());
    let on_change = Callback::new(move |v: String| vm.update_field(field, v));

    match field {
        ProcessField::Name => view! {
            <div class="form__cell form__cell--wide">
                <Input
                    id=id
                    label=label
                    value=value
                    on_input=on_change
                    placeholder="Введите название процесса"
                    disabled=disabled
                    required=true
                />
            </div>
        }
        .into_any(),
        ProcessField::SubjectCategories => view! {
            <div class="form__cell form__cell--wide">
                <CheckboxGroup
                    label=label
                    options=Signal::derive(move || vm.options(field))
                    selected=Signal::derive(move || vm.categories())
                    on_change=Callback::new(move |values| vm.set_categories(values))
                    disabled=disabled
                />
            </div>
        }
        .into_any(),
        ProcessField::LegalBasisOther => view! {
            <Show when=move || vm.legal_basis_other_visible()>
                <div class="form__cell form__cell--wide">
                    <Textarea
                        id=id.clone()
                        label=label.clone()
                        value=value
                        on_input=on_change
                        placeholder="Укажите альтернативное основание"
                        disabled=disabled
                        required=true
                    />
                </div>
            </Show>
        }
        .into_any(),
        other if other.is_free_text() => view! {
            <div class="form__cell form__cell--wide">
                <Textarea id=id label=label value=value on_input=on_change disabled=disabled />
            </div>
        }
        .into_any(),
        other => view! {
            <div class="form__cell">
                <Select
                    id=id
                    label=label
                    value=value
                    on_change=on_change
                    options=Signal::derive(move || vm.options(other))
                    disabled=disabled
                    required={other == ProcessField::LegalBasis}
                />
            </div>
        }
        .into_any(),
    }
}
