use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct NameDialogProps {
    #[prop_or_default]
    pub open: bool,
    pub on_submit: Callback<String>,
}

/// Asks for a display name before the first game. Blank input keeps the dialog open.
#[function_component]
pub(crate) fn NameDialog(props: &NameDialogProps) -> Html {
    let name = use_state(String::new);

    let oninput = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            {
                name.set(input.value());
            }
        })
    };

    let onsubmit = {
        let name = name.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                on_submit.emit(trimmed.to_string());
            }
        })
    };

    let blank = name.trim().is_empty();

    html! {
        <dialog id="player-name" open={props.open}>
            <article>
                <h2>{"Welcome to PairUp!"}</h2>
                <p>{"Enter your name to start playing and track your scores."}</p>
                <form {onsubmit}>
                    <input
                        type="text"
                        placeholder="Your name"
                        maxlength="20"
                        value={(*name).clone()}
                        {oninput}
                    />
                    <footer>
                        <button type="submit" disabled={blank}>{"Start Playing"}</button>
                    </footer>
                </form>
            </article>
        </dialog>
    }
}
