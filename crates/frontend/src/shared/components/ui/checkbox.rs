use contracts::shared::reference::SelectOption;
use leptos::prelude::*;

/// Флажок только для чтения (ячейки "да/нет")
#[component]
pub fn ReadonlyCheckbox(checked: bool, #[prop(optional, into)] title: String) -> impl IntoView {
    view! {
        <input type="checkbox" class="form__checkbox" checked=checked disabled=true title=title />
    }
}

/// Множественный выбор флажками
#[component]
pub fn CheckboxGroup(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    /// Отмеченные значения
    #[prop(into)]
    selected: Signal<Vec<String>>,
    on_change: Callback<Vec<String>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let toggle = move |value: String, checked: bool| {
        let mut values = selected.get_untracked();
        values.retain(|v| *v != value);
        if checked {
            values.push(value);
        }
        on_change.run(values);
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! { <span class="form__label">{l}</span> })}
            <div class="form__checkbox-list">
                <For
                    each=move || options.get()
                    key=|option| option.value.clone()
                    children=move |option| {
                        let value = option.value.clone();
                        let checkbox_id = format!("cb-{}", option.value);
                        let is_checked = {
                            let value = value.clone();
                            move || selected.get().contains(&value)
                        };
                        view! {
                            <div class="form__checkbox-wrapper">
                                <input
                                    id=checkbox_id.clone()
                                    type="checkbox"
                                    class="form__checkbox"
                                    prop:checked=is_checked
                                    disabled=move || disabled.get()
                                    on:change=move |ev| toggle(value.clone(), event_target_checked(&ev))
                                />
                                <label class="form__checkbox-label" for=checkbox_id>
                                    {option.label}
                                </label>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
