mod common;
use common::fuzzer;
use gramcov::ExpansionSet;

fn main() {
    let mut fuzzer = fuzzer(
        r#"
        grammar = {
            "<start>": ["<digit><digit>"],
            "<digit>": ["0", "1"],
        }
    "#,
    );

    let ceiling = fuzzer.max_expansion_coverage(None, None).unwrap();
    while fuzzer.expansion_coverage().len() < ceiling.len() {
        let (input, used): (String, ExpansionSet) = fuzzer.fuzz_visit().unwrap();
        fuzzer.add_coverage(used);
        println!(
            "{}  ({} of {} expansions)",
            input,
            fuzzer.expansion_coverage().len(),
            ceiling.len()
        );
    }
}
