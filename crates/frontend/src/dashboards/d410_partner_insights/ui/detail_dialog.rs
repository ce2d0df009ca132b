use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d410_partner_insights::model::DetailDialog;

/// Modal with the server-rendered breakdown. The markup comes from our own
/// backend, which escapes all database text.
#[component]
pub fn DetailDialogView(
    open: RwSignal<bool>,
    #[prop(into)] dialog: Signal<Option<DetailDialog>>,
) -> impl IntoView {
    let title = move || dialog.with(|d| d.as_ref().map(|d| d.title.clone()).unwrap_or_default());
    let markup = move || dialog.with(|d| d.as_ref().map(|d| d.markup.clone()).unwrap_or_default());

    view! {
        <Dialog open=open>
            <DialogSurface attr:style="max-width: 1000px; width: 100%;">
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        <div class="partner-insights-dialog" inner_html=markup></div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| open.set(false)>
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
