#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the start offset, the rest is file content
    let Some((&from, content)) = data.split_first() else {
        return;
    };

    let mut last = 0;
    let total = dirwatcher::scan_reader(content, from as usize, "ME", |line| {
        assert!(line > last);
        last = line;
    })
    .expect("in-memory reads cannot fail");

    assert!(last <= total);
});
