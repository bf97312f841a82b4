#![no_main]
use libfuzzer_sys::fuzz_target;
use simple_transform::{MultipleTransformPolicy, ReaderOptions};

fuzz_target!(|data: &[u8]| {
    let options = ReaderOptions::new().multiple_transforms(MultipleTransformPolicy::UseFirst);
    if let Ok(t) = options.read_from(data) {
        let _ = t.parameters();
        let _ = t.fixed_parameters();
        let _ = t.to_string();
        let point = vec![0.5; t.dimension()];
        let _ = t.transform_point(&point);
    }
});
