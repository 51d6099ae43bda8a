use scraper::{Html, Selector};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub src: String,
    /// Empty when the tag has no `alt` attribute.
    pub alt: String,
}

/// How an image source can be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Inline,
    Unsupported,
}

impl ImageRef {
    pub fn source_kind(&self) -> SourceKind {
        if self.src.starts_with("http") {
            SourceKind::Remote
        } else if self.src.starts_with("data:image") {
            SourceKind::Inline
        } else {
            SourceKind::Unsupported
        }
    }
}

/// A parsed HTML document whose `<img>` tags can be walked any number of times.
pub struct ImagePage {
    document: Html,
    img_selector: Selector,
}

impl ImagePage {
    pub fn parse(html: &str) -> Self {
        ImagePage {
            document: Html::parse_document(html),
            img_selector: Selector::parse("img").unwrap(),
        }
    }

    /// `<img>` tags in document order. Tags without a usable `src` are skipped.
    pub fn images(&self) -> impl Iterator<Item = ImageRef> + '_ {
        self.document.select(&self.img_selector).filter_map(|img| {
            let src = img.value().attr("src")?.trim();
            if src.is_empty() {
                return None;
            }
            let alt = img.value().attr("alt").unwrap_or("");
            Some(ImageRef {
                src: src.to_string(),
                alt: alt.to_string(),
            })
        })
    }
}

pub fn extract_images(html: &str) -> Vec<ImageRef> {
    ImagePage::parse(html).images().collect()
}
