//! Candidate builder invariants over random timestamps and deltas.

use proptest::prelude::*;

use vanity_rs::vanity::{CommitTemplate, Scratch};

fn template_for(author: i64, committer: i64) -> CommitTemplate {
    let raw = format!(
        "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
         author a <a@a> {author} +0000\n\
         committer c <c@c> {committer} +0000\n\
         \nmsg\n"
    );
    CommitTemplate::parse(raw.as_bytes()).expect("fixture commit parses")
}

proptest! {
    /// Accepted candidates keep the buffer length and only touch the two
    /// field byte ranges; rejected candidates leave the buffer untouched.
    #[test]
    fn length_and_locality(
        author in 1i64..=9_999_999_999,
        committer in 1i64..=9_999_999_999,
        delta_author in -100_000i64..=100_000,
        delta_committer in -100_000i64..=100_000,
    ) {
        let template = template_for(author, committer);
        let mut scratch = Scratch::new(&template);
        let before = scratch.bytes().to_vec();
        let applied = scratch.apply(&template, delta_author, delta_committer);

        prop_assert_eq!(scratch.bytes().len(), template.bytes().len());

        let a = template.author();
        let c = template.committer();
        for (i, (old, new)) in before.iter().zip(scratch.bytes().iter()).enumerate() {
            let mutable = (a.offset..a.offset + a.width).contains(&i)
                || (c.offset..c.offset + c.width).contains(&i);
            if !mutable {
                prop_assert_eq!(old, new, "immutable byte {} changed", i);
            }
        }

        match applied {
            Ok(()) => {
                let rendered: i64 = std::str::from_utf8(
                    &scratch.bytes()[a.offset..a.offset + a.width],
                )
                .unwrap()
                .parse()
                .unwrap();
                prop_assert_eq!(rendered, author + delta_author);
            }
            Err(err) => {
                prop_assert_eq!(scratch.bytes(), &before[..]);
                // A rejection always means a width change or negative value.
                let value = err.value;
                prop_assert!(
                    value < 0
                        || value.to_string().len() != err.width,
                    "rejected value {} actually fits width {}", value, err.width
                );
            }
        }
    }
}
