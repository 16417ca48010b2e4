use tracing::debug;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::Chart;

const HOST_PLACEHOLDER: &str = "%h";

impl<R: Renderer> Chart<R> {
    /// Title as configured, placeholders unexpanded.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) -> ChartResult<()> {
        debug!(title = ?title, "set title");
        self.title = title;
        self.replot()
    }

    /// Title with every `%h` replaced by the shortened form of `host`.
    #[must_use]
    pub fn expanded_title(&self, host: &str) -> Option<String> {
        let title = self.title.as_deref()?;
        if !title.contains(HOST_PLACEHOLDER) {
            return Some(title.to_owned());
        }
        Some(title.replace(HOST_PLACEHOLDER, &shorten_host(host)))
    }
}

/// Drops the domain part of each `@`-separated host name.
///
/// Names that look like IP addresses (a leading all-digit label, or any
/// colon) are kept whole.
#[must_use]
pub fn shorten_host(host: &str) -> String {
    host.split('@')
        .map(|name| match name.split_once('.') {
            Some((head, _)) if !looks_like_address(name) => head,
            _ => name,
        })
        .collect::<Vec<_>>()
        .join("@")
}

fn looks_like_address(name: &str) -> bool {
    if name.contains(':') {
        return true;
    }
    name.split_once('.')
        .is_some_and(|(head, _)| !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::shorten_host;

    #[test]
    fn keeps_addresses_and_bare_names() {
        assert_eq!(shorten_host("localhost"), "localhost");
        assert_eq!(shorten_host("10.0.0.1"), "10.0.0.1");
        assert_eq!(shorten_host("fe80::1.2"), "fe80::1.2");
    }

    #[test]
    fn shortens_each_proxied_component() {
        assert_eq!(
            shorten_host("web.example.com@proxy.example.org"),
            "web@proxy"
        );
        assert_eq!(shorten_host("db.example.com@192.168.1.4"), "db@192.168.1.4");
    }
}
