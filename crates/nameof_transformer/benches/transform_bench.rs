use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nameof_options::NameofOptions;
use nameof_transformer::replace_in_text;

// A service class whose methods use every call form.
const TYPESCRIPT_SOURCE: &str = r#"
import nm from "ts-nameof.macro";

interface User {
    id: number;
    name: string;
    preferences: { theme: 'light' | 'dark'; tags: string[] };
}

export class UserService {
    private readonly users = new Map<number, User>();

    describe(user: User, index: number): string {
        const field = nm.full(user.preferences.tags[nm.interpolate(index)]);
        return `${nm(user)}.${nm(this.describe)}: ${field}`;
    }

    keys(): string[] {
        return [
            nm<User>(u => u.id),
            nm.full<User>(u => u.preferences.theme),
            ...nm.array<User>(u => u.name, u => u.preferences),
        ];
    }

    path(): string[] {
        return nm.split(this.users.size);
    }
}
"#;

/// The sample repeated `times` times, so larger inputs have more calls.
fn repeated_source(times: usize) -> String {
    let (import, body) = TYPESCRIPT_SOURCE.trim_start().split_once('\n').unwrap_or(("", TYPESCRIPT_SOURCE));
    let mut source = String::with_capacity(TYPESCRIPT_SOURCE.len() * times);
    let _ = writeln!(source, "{}", import);
    for i in 0..times {
        let _ = writeln!(source, "namespace N{} {{{}}}", i, body);
    }
    source
}

fn bench_replace_small(c: &mut Criterion) {
    let options = NameofOptions::default();
    c.bench_function("replace_typescript_small", |b| {
        b.iter(|| {
            let result = replace_in_text("bench.ts", black_box(TYPESCRIPT_SOURCE), &options);
            black_box(result.output);
        });
    });
}

fn bench_replace_large(c: &mut Criterion) {
    let options = NameofOptions::default();
    let source = repeated_source(50);
    c.bench_function("replace_typescript_large", |b| {
        b.iter(|| {
            let result = replace_in_text("bench.ts", black_box(&source), &options);
            black_box(result.transformed_calls);
        });
    });
}

criterion_group!(benches, bench_replace_small, bench_replace_large);
criterion_main!(benches);
