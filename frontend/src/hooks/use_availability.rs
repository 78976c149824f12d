use shared::MonthSelection;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::state::MonthGrid;

#[derive(Clone)]
pub struct AvailabilityState {
    pub selection: MonthSelection,
    pub grid: Option<MonthGrid>,
    pub error: Option<String>,
}

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
    pub actions: UseAvailabilityActions,
}

#[derive(Clone)]
pub struct UseAvailabilityActions {
    pub select_month: Callback<MonthSelection>,
    pub set_grid: Callback<MonthGrid>,
    pub reload: Callback<()>,
}

/// Month selection plus the grid loaded for it.
///
/// Every reload re-fetches the person's records and rebuilds the grid
/// from scratch; nothing is cached across month switches. Each fetch is
/// tagged with a sequence number so that a response arriving after a
/// newer fetch was issued is discarded instead of overwriting the grid.
#[hook]
pub fn use_availability(api_client: &ApiClient) -> UseAvailabilityResult {
    let selection = use_state(MonthSelection::default);
    let grid = use_state(|| Option::<MonthGrid>::None);
    let error = use_state(|| Option::<String>::None);
    let fetch_seq = use_mut_ref(|| 0u64);

    let reload = {
        let api_client = api_client.clone();
        let selection = selection.clone();
        let grid = grid.clone();
        let error = error.clone();
        let fetch_seq = fetch_seq.clone();

        Callback::from(move |_| {
            let api_client = api_client.clone();
            let grid = grid.clone();
            let error = error.clone();
            let MonthSelection { year, month } = *selection;

            let seq = {
                let mut current = fetch_seq.borrow_mut();
                *current += 1;
                *current
            };
            let fetch_seq = fetch_seq.clone();

            spawn_local(async move {
                let result = api_client.fetch_availability().await;

                // A newer fetch was issued while this one was in flight;
                // its result must not overwrite the newer grid.
                if *fetch_seq.borrow() != seq {
                    return;
                }

                match result {
                    Ok(records) => {
                        grid.set(Some(MonthGrid::build(year, month, &records)));
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to load availability:", e.clone());
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let select_month = {
        let selection = selection.clone();
        Callback::from(move |next: MonthSelection| {
            selection.set(next);
        })
    };

    let set_grid = {
        let grid = grid.clone();
        Callback::from(move |next: MonthGrid| {
            grid.set(Some(next));
        })
    };

    // Load on mount and again whenever the selected month changes.
    use_effect_with(selection.clone(), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    let state = AvailabilityState {
        selection: *selection,
        grid: (*grid).clone(),
        error: (*error).clone(),
    };

    let actions = UseAvailabilityActions {
        select_month,
        set_grid,
        reload,
    };

    UseAvailabilityResult { state, actions }
}
