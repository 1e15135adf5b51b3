use std::collections::HashMap;

use sprig_core::grammar::{self, Associativity, OpKey, Role};

#[test]
fn at_most_one_definition_per_key_and_role() {
    let mut seen: HashMap<(OpKey, u8), usize> = HashMap::new();
    for def in grammar::OPERATORS {
        let role_tag = def.role as u8;
        let count = seen.entry((def.key, role_tag)).or_insert(0);
        *count += 1;
        assert_eq!(
            *count, 1,
            "duplicate definition for {:?} in role {:?}",
            def.key, def.role
        );
    }
}

#[test]
fn every_symbol_has_one_to_three_roles() {
    let mut by_key: HashMap<OpKey, usize> = HashMap::new();
    for def in grammar::OPERATORS {
        *by_key.entry(def.key).or_insert(0) += 1;
    }
    for (key, count) in by_key {
        assert!(
            (1..=3).contains(&count),
            "{key:?} has {count} role definitions"
        );
    }
}

#[test]
fn spellings_resolve_back_to_their_key() {
    for def in grammar::OPERATORS {
        if let Some(sp) = grammar::spelling(def.key) {
            assert_eq!(
                grammar::from_str(sp),
                Some(def.key),
                "spelling {sp:?} does not resolve to {:?}",
                def.key
            );
        }
    }
}

#[test]
fn spellings_are_unique() {
    let mut seen: HashMap<&'static str, OpKey> = HashMap::new();
    for def in grammar::OPERATORS {
        let Some(sp) = grammar::spelling(def.key) else {
            continue;
        };
        if let Some(prev) = seen.insert(sp, def.key) {
            assert_eq!(
                prev, def.key,
                "spelling {sp:?} is shared by {prev:?} and {:?}",
                def.key
            );
        }
    }
}

#[test]
fn synthetic_keys_have_no_spelling() {
    for key in [
        OpKey::Apply,
        OpKey::Seq,
        OpKey::Empty,
        OpKey::Indent,
        OpKey::Undent,
        OpKey::Begin,
        OpKey::End,
    ] {
        assert_eq!(grammar::spelling(key), None, "{key:?} should be synthetic");
        assert!(!grammar::name(key).is_empty());
    }
}

#[test]
fn delimiter_partners_are_symmetric() {
    for def in grammar::OPERATORS {
        match def.role {
            Role::OpenDelim | Role::CloseDelim => {
                let partner_key = def.partner.unwrap_or_else(|| {
                    panic!("delimiter {:?} has no partner", def.key);
                });
                let partner_role = match def.role {
                    Role::OpenDelim => Role::CloseDelim,
                    _ => Role::OpenDelim,
                };
                let partner = grammar::lookup(partner_key, partner_role).unwrap_or_else(|| {
                    panic!("partner {partner_key:?} of {:?} missing from table", def.key);
                });
                assert_eq!(
                    partner.partner,
                    Some(def.key),
                    "partner link of {partner_key:?} does not point back to {:?}",
                    def.key
                );
            }
            _ => assert_eq!(
                def.partner, None,
                "non-delimiter {:?} carries a partner",
                def.key
            ),
        }
    }
}

#[test]
fn delimiters_are_tightest_and_left_associative() {
    for def in grammar::OPERATORS {
        let is_delim = matches!(def.role, Role::OpenDelim | Role::CloseDelim);
        if is_delim {
            assert_eq!(def.precedence, grammar::DELIM_PRECEDENCE);
            assert_eq!(def.associativity, Associativity::Left);
        } else if def.role != Role::Expression {
            assert!(
                def.precedence < grammar::DELIM_PRECEDENCE,
                "{:?} {:?} binds as tight as a delimiter",
                def.key,
                def.role
            );
        }
    }
}

#[test]
fn block_opening_and_operand_flags_only_on_prefix_or_infix() {
    for def in grammar::OPERATORS {
        if def.opens_block || def.operand_required {
            assert!(
                matches!(def.role, Role::Infix | Role::Prefix),
                "{:?} {:?} carries an infix/prefix-only flag",
                def.key,
                def.role
            );
        }
    }
}

#[test]
fn every_spelled_operator_has_a_pickable_role() {
    // A lexed operator token must resolve to at least one of the roles the
    // arity resolver knows how to pick.
    for def in grammar::OPERATORS {
        if grammar::spelling(def.key).is_none() {
            continue;
        }
        let pickable = grammar::defs_for(def.key).any(|d| {
            matches!(
                d.role,
                Role::Prefix | Role::Infix | Role::Postfix | Role::OpenDelim | Role::CloseDelim
            )
        });
        assert!(pickable, "{:?} has no pickable role", def.key);
    }
}
