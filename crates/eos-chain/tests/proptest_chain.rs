use proptest::prelude::*;

use eos_chain::abi::{AbiField, AbiType, ActionCodec, ActionLayout, StaticLayouts};
use eos_chain::{Asset, Name, Transaction};

/// Strategy for valid name strings: 1-12 chars from the name alphabet.
/// (The 13th character is restricted to a 4-bit range; 12 keeps the
/// generator simple while covering every 5-bit symbol.)
fn name_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('.'),
            prop::char::range('1', '5'),
            prop::char::range('a', 'z'),
        ],
        1..=12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn asset_amount_roundtrip(
        amount in any::<i64>(),
        precision in 0u8..=18,
        code in "[A-Z]{1,7}",
    ) {
        let encoded = Asset::encode_amount(&amount.to_string(), &code, precision).unwrap();
        let (amount2, code2, precision2) = Asset::decode_amount(&encoded).unwrap();
        prop_assert_eq!(amount2, amount.to_string());
        prop_assert_eq!(code2, code);
        prop_assert_eq!(precision2, precision);
    }

    #[test]
    fn asset_display_roundtrip(
        amount in any::<i64>(),
        precision in 0u8..=18,
        code in "[A-Z]{1,7}",
    ) {
        let text = Asset::encode_amount(&amount.to_string(), &code, precision).unwrap();
        let asset: Asset = text.parse().unwrap();
        prop_assert_eq!(asset.amount(), amount);
        prop_assert_eq!(asset.to_string(), text);
    }

    #[test]
    fn name_text_roundtrip(s in name_string()) {
        // Trailing dots canonicalize away; compare against the trimmed form.
        let name: Name = s.parse().unwrap();
        let canonical = s.trim_end_matches('.');
        prop_assert_eq!(name.to_string(), canonical);

        let reparsed: Name = name.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, name);
    }

    #[test]
    fn transfer_args_roundtrip(
        from in name_string(),
        to in name_string(),
        amount in any::<i64>(),
        memo in ".{0,64}",
    ) {
        let codec = ActionCodec::new(StaticLayouts::eosio_token());
        let account: Name = "eosio.token".parse().unwrap();
        let action: Name = "transfer".parse().unwrap();

        let from = from.trim_end_matches('.').to_string();
        let to = to.trim_end_matches('.').to_string();
        prop_assume!(!from.is_empty() && !to.is_empty());

        let quantity = Asset::encode_amount(&amount.to_string(), "EOS", 4).unwrap();
        let args = serde_json::json!({
            "from": from, "to": to, "quantity": quantity, "memo": memo,
        });

        let data = codec.encode(account, action, &args).unwrap();
        prop_assert_eq!(codec.decode(account, action, &data).unwrap(), args);
    }

    #[test]
    fn decoding_truncated_args_fails(cut in 1usize..37) {
        let codec = ActionCodec::new(StaticLayouts::eosio_token());
        let account: Name = "eosio.token".parse().unwrap();
        let action: Name = "transfer".parse().unwrap();

        let data = codec
            .encode(account, action, &serde_json::json!({
                "from": "dappdropzone", "to": "laijiyong123",
                "quantity": "8.8000 EOS", "memo": "mamo",
            }))
            .unwrap();
        prop_assert!(codec.decode(account, action, &data[..data.len() - cut]).is_err());
    }

    #[test]
    fn integer_layout_roundtrip(
        id in any::<u64>(),
        count in any::<u32>(),
        delta in any::<i64>(),
        live in any::<bool>(),
    ) {
        let mut table = StaticLayouts::new();
        let acct: Name = "testacct".parse().unwrap();
        let act: Name = "store".parse().unwrap();
        table.register(acct, act, ActionLayout::new(vec![
            AbiField::new("id", AbiType::U64),
            AbiField::new("count", AbiType::Varuint32),
            AbiField::new("delta", AbiType::I64),
            AbiField::new("live", AbiType::Bool),
        ]));
        let codec = ActionCodec::new(table);

        let args = serde_json::json!({
            "id": id, "count": count, "delta": delta, "live": live,
        });
        let data = codec.encode(acct, act, &args).unwrap();
        prop_assert_eq!(codec.decode(acct, act, &data).unwrap(), args);
    }

    #[test]
    fn transaction_bytes_roundtrip(
        expiration in any::<u32>(),
        ref_block_num in any::<u16>(),
        ref_block_prefix in any::<u32>(),
        delay_sec in any::<u32>(),
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut tx = Transaction::new();
        tx.expiration = eos_chain::TimePointSec::from_unix(expiration);
        tx.ref_block_num = ref_block_num;
        tx.ref_block_prefix = ref_block_prefix;
        tx.delay_sec = delay_sec;
        tx.actions.push(eos_chain::Action::new(
            "eosio.token".parse().unwrap(),
            "transfer".parse().unwrap(),
            vec![],
            data,
        ));

        let bytes = tx.to_bytes().unwrap();
        let back = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(back, tx);
    }
}
