#![no_main]

use libfuzzer_sys::fuzz_target;
use riir_dsp::AllpassInstance;
use riir_spec::AllpassSpec;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spec) = AllpassSpec::from_json(text) else {
        return;
    };

    // Accepted specs must survive a serialize/parse cycle unchanged.
    if let Ok(json) = spec.to_json() {
        if let Ok(reparsed) = AllpassSpec::from_json(&json) {
            assert_eq!(reparsed.allpass.order(), spec.allpass.order());
        }
    }

    // Configuration either succeeds or returns an error; a configured
    // instance must run a short block of silence to silence.
    let mut instance = AllpassInstance::new();
    if instance.configure(&spec).is_ok() {
        let input = [0.0f32; 64];
        let mut output = [1.0f32; 64];
        if instance.process_block(&input, &mut output).is_ok() {
            assert!(output.iter().all(|&s| s == 0.0));
        }
    }
});
