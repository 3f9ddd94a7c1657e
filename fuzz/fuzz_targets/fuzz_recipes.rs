#![no_main]

use libfuzzer_sys::fuzz_target;
use recipe_protocol::utils::SequentialIds;
use recipe_protocol::RecipeCodec;

fuzz_target!(|data: &[u8]| {
    let codec = RecipeCodec::default().with_id_generator(SequentialIds::new());

    // Anything that decodes must re-encode to a decodable buffer
    if let Ok(recipes) = codec.decode_collection(data) {
        if let Ok(encoded) = codec.encode_collection(&recipes) {
            let decoded = codec.decode_collection(&encoded);
            assert!(decoded.is_ok());
        }
    }

    let _ = codec.decode_crafting_data(data);
});
