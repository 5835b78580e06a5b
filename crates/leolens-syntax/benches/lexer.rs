use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leolens_syntax::tokenize;

const PROGRAM: &str = r#"
program token.aleo {
    mapping balances: address => u64;

    record Token {
        owner: address,
        amount: u64,
    }

    transition mint(receiver: address, amount: u64) -> Token {
        let bonus: u64 = amount / 100u64;
        return Token {
            owner: receiver,
            amount: amount + bonus,
        };
    }

    /* burn the given token and credit the public balance */
    transition burn(token: Token) -> u64 {
        assert_eq(token.owner, self.caller);
        return token.amount;
    }

    inline clamp(value: u64, max: u64) -> u64 {
        return value <= max ? value : max; // saturating
    }
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    let large: String = PROGRAM.repeat(64);

    c.bench_function("tokenize_program", |b| {
        b.iter(|| tokenize(black_box(PROGRAM)))
    });
    c.bench_function("tokenize_program_64x", |b| {
        b.iter(|| tokenize(black_box(&large)))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
