use crate::extract::ImageRef;

/// Decides whether an image belongs in the color survey.
pub trait ImageClassifier {
    fn is_relevant(&self, image: &ImageRef) -> bool;
}

/// Keeps every image. Placeholder until images can be told apart by subject.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ImageClassifier for AcceptAll {
    fn is_relevant(&self, _image: &ImageRef) -> bool {
        true
    }
}

impl<F> ImageClassifier for F
where
    F: Fn(&ImageRef) -> bool,
{
    fn is_relevant(&self, image: &ImageRef) -> bool {
        self(image)
    }
}
