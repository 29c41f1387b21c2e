#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String, bool)| {
    let mut tree = routetree::Node::new();

    for (key, item) in data.0 {
        if tree.insert(key, item).is_err() {
            return;
        }
    }

    let _ = tree.at(&data.1);
    let _ = tree.at_unescaped(&data.1);
    let _ = tree.path_ignore_case(&data.1, data.2);
});
