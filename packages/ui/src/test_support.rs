//! Rendering helpers for component tests.

use std::rc::Rc;

use dioxus::prelude::*;

/// The tree a test mounts under the router.
#[derive(Clone)]
struct Mounted(Rc<dyn Fn() -> Element>);

#[derive(Routable, Clone, Debug, PartialEq)]
enum TestRoute {
    #[route("/")]
    Fixture {},
}

#[component]
fn Fixture() -> Element {
    let mounted = use_context::<Mounted>();
    (mounted.0)()
}

fn routed() -> Element {
    rsx! { Router::<TestRoute> {} }
}

/// Render `body` once inside a live runtime with a router at `/`.
pub fn render(body: impl Fn() -> Element + 'static) -> String {
    let mut dom = VirtualDom::new(routed).with_root_context(Mounted(Rc::new(body)));
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

/// The opening tag of the element carrying `data-testid="{testid}"`.
pub fn opening_tag<'a>(html: &'a str, testid: &str) -> Option<&'a str> {
    let marker = html.find(&format!("data-testid=\"{testid}\""))?;
    let start = html[..marker].rfind('<')?;
    let end = marker + html[marker..].find('>')?;
    Some(&html[start..=end])
}
