use gloo::events::EventListener;
use shared::{AvailabilityStatus, MonthSelection};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::hooks::use_availability;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::state::DragGesture;

#[derive(Properties, PartialEq)]
pub struct AvailabilityCalendarProps {
    pub api_client: ApiClient,
}

/// Month calendar grid for marking per-day availability.
///
/// Pressing a cell advances it one step through the status cycle and
/// starts a drag gesture; every cell the pointer passes over while the
/// button is held receives the same status. Each actual change is
/// persisted immediately.
#[function_component(AvailabilityCalendar)]
pub fn availability_calendar(props: &AvailabilityCalendarProps) -> Html {
    let result = use_availability(&props.api_client);
    let state = result.state;
    let actions = result.actions;

    let gesture = use_mut_ref(DragGesture::default);

    // Releasing the button anywhere ends the gesture, including outside
    // the grid, so the listener lives on the document.
    {
        let gesture = gesture.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&gloo::utils::document(), "mouseup", move |_| {
                gesture.borrow_mut().release();
            });
            move || drop(listener)
        });
    }

    let on_month_change = {
        let select_month = actions.select_month.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match date_utils::parse_month_value(&input.value()) {
                Some((year, month)) => select_month.emit(MonthSelection { year, month }),
                None => {
                    gloo::console::warn!("Ignoring malformed month value:", input.value());
                }
            }
        })
    };

    // Apply a status to one cell and persist it. Skips the save and the
    // state update entirely when the cell already has that status.
    let paint_cell = {
        let grid = state.grid.clone();
        let set_grid = actions.set_grid.clone();
        let api_client = props.api_client.clone();

        Callback::from(move |(date, status): (String, AvailabilityStatus)| {
            let Some(mut updated) = grid.clone() else {
                return;
            };
            if !updated.apply(&date, status) {
                return;
            }
            set_grid.emit(updated);

            let api_client = api_client.clone();
            spawn_local(async move {
                if let Err(e) = api_client.save_availability(&date, status).await {
                    gloo::console::error!("Failed to save availability:", e);
                }
            });
        })
    };

    html! {
        <div class="availability-widget">
            <div class="calendar-header">
                <label for="month-picker">{"Month"}</label>
                <input
                    type="month"
                    id="month-picker"
                    value={date_utils::month_value(state.selection.year, state.selection.month)}
                    onchange={on_month_change}
                />
            </div>

            {if let Some(error) = state.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}

            {if let Some(grid) = state.grid.as_ref() {
                html! {
                    <div class="calendar-grid" id="calendar-grid">
                        {for grid.cells.iter().map(|cell| {
                            let status = cell.status;
                            let onmousedown = {
                                let gesture = gesture.clone();
                                let paint_cell = paint_cell.clone();
                                let date = cell.date.clone();
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default(); // keep the drag from selecting text
                                    let target = gesture.borrow_mut().press(status);
                                    paint_cell.emit((date.clone(), target));
                                })
                            };
                            let onmouseenter = {
                                let gesture = gesture.clone();
                                let paint_cell = paint_cell.clone();
                                let date = cell.date.clone();
                                Callback::from(move |_: MouseEvent| {
                                    if let Some(target) = gesture.borrow().painting() {
                                        paint_cell.emit((date.clone(), target));
                                    }
                                })
                            };

                            html! {
                                <div
                                    key={cell.date.clone()}
                                    class={classes!("day-slot", cell.status.as_str())}
                                    data-date={cell.date.clone()}
                                    data-status={cell.status.as_str()}
                                    {onmousedown}
                                    {onmouseenter}
                                >
                                    <div class="day-name">{cell.weekday_label}</div>
                                    <div class="day-number">{cell.day}</div>
                                </div>
                            }
                        })}
                    </div>
                }
            } else if state.error.is_none() {
                html! { <div class="loading">{"Loading calendar..."}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}
