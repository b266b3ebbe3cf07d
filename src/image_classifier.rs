pub mod decoded_image;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod imagenet_classes;
pub mod interface;
pub mod prediction;
pub mod tract;
