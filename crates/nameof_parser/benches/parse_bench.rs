use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nameof_parser::parse_source_text;

// A medium-size TypeScript source mixing runtime code and nameof calls.
const TYPESCRIPT_SOURCE: &str = r#"
import { nameof } from "ts-nameof";

interface User {
    id: number;
    name: string;
    preferences: { theme: 'light' | 'dark' };
}

type UserMap = Map<number, User>;

class UserService {
    private users: UserMap = new Map();

    createUser(name: string): User {
        const user: User = { id: this.users.size, name, preferences: { theme: 'light' } };
        this.users.set(user.id, user);
        console.log(`created ${nameof(user)} via ${nameof(this.createUser)}`);
        return user;
    }

    keys(): string[] {
        return [nameof<User>(u => u.id), nameof.full<User>(u => u.preferences.theme)];
    }
}

export const processUsers = (users: User[]): number =>
    users.reduce((count, user) => (user.id > 18 ? count + 1 : count), 0);

export default UserService;
"#;

fn bench_parse_typescript(c: &mut Criterion) {
    c.bench_function("parse_typescript_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let result = parse_source_text(&arena, "bench.ts", black_box(TYPESCRIPT_SOURCE));
            black_box(result.source_file);
        });
    });
}

criterion_group!(benches, bench_parse_typescript);
criterion_main!(benches);
