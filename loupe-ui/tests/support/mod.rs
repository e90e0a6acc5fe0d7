use loupe_ui::{DomHost, MemoryHost, NodeId};

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Append a `section` to the body holding one `img[data-lightbox]` per URL.
///
/// Thumbnails get `src="thumbs/<url>"` so tests can tell the two URLs apart.
#[allow(dead_code)]
pub fn gallery_page(host: &MemoryHost, urls: &[&str]) -> (NodeId, Vec<NodeId>) {
    let section = host.create_element("section").unwrap();
    host.append_child(&host.body(), &section).unwrap();

    let thumbnails = urls
        .iter()
        .map(|url| {
            let img = host.create_element("img").unwrap();
            host.set_attribute(&img, "src", &format!("thumbs/{url}"));
            host.set_attribute(&img, "data-lightbox", url);
            host.append_child(&section, &img).unwrap();
            img
        })
        .collect();

    (section, thumbnails)
}
