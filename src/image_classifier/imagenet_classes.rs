use std::sync::OnceLock;

const IMAGENET_CLASSES_TEXT: &str = include_str!("imagenet_classes.txt");

pub const IMAGENET_CLASS_COUNT: usize = 1000;

/// The ImageNet label table, indexed by score position.
pub fn imagenet_classes() -> &'static [&'static str] {
    static CLASSES: OnceLock<Vec<&'static str>> = OnceLock::new();
    CLASSES.get_or_init(|| {
        let classes: Vec<&'static str> = IMAGENET_CLASSES_TEXT
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        debug_assert_eq!(classes.len(), IMAGENET_CLASS_COUNT);
        classes
    })
}
