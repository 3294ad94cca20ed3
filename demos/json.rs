mod common;
use common::fuzzer;
use gramcov::ExpansionSet;

fn main() {
    let grammar = r#"
        grammar = {
            "<start>": ["<json>"],
            "<json>": ["{<members>}", "{}"],
            "<members>": ["<member>", "<member>, <members>"],
            "<member>": ["<string>: <value>"],
            "<value>": ["<json>", "[<elements>]", "<string>", "<number>", "true", "false", "null"],
            "<elements>": ["<value>", "<value>, <elements>"],
            "<string>": ['"<chars>"'],
            "<chars>": ["<char>", "<char><chars>"],
            "<char>": ["a", "b", "c", "_", "0"],
            "<number>": ["<digit>", "-<digit>", "<digit><number>"],
            "<digit>": ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
        }
    "#;

    let ceiling = fuzzer(grammar).max_expansion_coverage(None, None).unwrap();
    for depth in 4..=12 {
        let mut fuzzer = fuzzer(grammar).with_max_depth(depth);
        let reachable = fuzzer.max_expansion_coverage(None, Some(depth)).ok();
        for _ in 0..100 {
            let used: ExpansionSet = fuzzer.fuzz_visit().unwrap();
            fuzzer.add_coverage(used);
        }
        println!(
            "depth {:>2}: covered {} of {} expansions (reachable at this depth: {})",
            depth,
            fuzzer.expansion_coverage().len(),
            ceiling.len(),
            reachable.map_or_else(|| String::from("not all symbols"), |r| r.len().to_string())
        );
        println!("example: {}\n", fuzzer.fuzz().unwrap());
    }
}
