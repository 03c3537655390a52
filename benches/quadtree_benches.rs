use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use quadtree_broadphase::{Config, Node, Point, Rect, Spatial};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const EXTENT: i32 = 3900 * 2;

#[derive(Debug, Clone, Copy)]
struct Body {
    pos: Point<i32>,
    size: Point<i32>,
}

impl Spatial for Body {
    type Vector = Point<i32>;

    fn position(&self) -> Point<i32> {
        self.pos
    }

    fn size(&self) -> Point<i32> {
        self.size
    }
}

fn get_rand() -> impl rand::Rng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn bodies(rng: &mut impl Rng, len: usize, extent: i32, max_size: i32) -> Vec<Body> {
    (0..len)
        .map(|_| Body {
            pos: Point::new(
                rng.gen_range(0, extent - max_size),
                rng.gen_range(0, extent - max_size),
            ),
            size: Point::new(rng.gen_range(1, max_size), rng.gen_range(1, max_size)),
        })
        .collect()
}

fn root<'a>(extent: i32) -> Node<'a, Body, Point<i32>> {
    let bounds = Rect::new(Point::new(0, 0), Point::new(extent, extent)).unwrap();
    Node::root(bounds, Config::new(16, 8))
}

fn retrieve_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree retrieve sparse");
    for size in 8..16 {
        let size: usize = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();

            let objects = bodies(&mut rng, size, EXTENT, 32);
            let mut tree = root(EXTENT);
            tree.extend(objects.iter()).unwrap();

            let mut res = Vec::new();
            b.iter(|| {
                let query = &objects[rng.gen_range(0, objects.len())];
                res.clear();
                tree.retrieve(&mut res, query);
                black_box(&res);
            });
        });
    }
    group.finish();
}

fn retrieve_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree retrieve dense");
    for size in 8..16 {
        let size: usize = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();

            let objects = bodies(&mut rng, size, 200 * 2, 8);
            let mut tree = root(200 * 2);
            tree.extend(objects.iter()).unwrap();

            let mut res = Vec::new();
            b.iter(|| {
                let query = &objects[rng.gen_range(0, objects.len())];
                res.clear();
                tree.retrieve(&mut res, query);
                black_box(&res);
            });
        });
    }
    group.finish();
}

fn make_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree make_tree");
    for size in 8..16 {
        let size: usize = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let objects = bodies(&mut rng, size, EXTENT, 32);

            b.iter(|| {
                let tree = Node::<Body, Point<i32>>::from_objects(
                    objects.iter(),
                    Config::new(16, 8),
                )
                .unwrap();
                black_box(tree.depth())
            });
        });
    }
    group.finish();
}

fn rebuild_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree rebuild_tree");
    for size in 8..16 {
        let size: usize = 1 << size;

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let objects = bodies(&mut rng, size, EXTENT, 32);

            let mut tree = root(EXTENT);

            b.iter(|| {
                tree.clear();
                tree.extend(objects.iter()).unwrap();
            });
        });
    }
    group.finish();
}

fn random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree random_insert");
    for size in 8..16 {
        let size: usize = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let objects = bodies(&mut rng, size * 2, 29000, 32);
            let (initial, extra) = objects.split_at(size);

            b.iter_batched(
                || {
                    let mut tree = root(29000);
                    tree.extend(initial.iter()).unwrap();
                    tree
                },
                |mut tree| {
                    let body = &extra[rng.gen_range(0, extra.len())];
                    tree.insert(body).unwrap();
                    tree
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    quadtree_benches,
    retrieve_sparse,
    retrieve_dense,
    make_tree,
    rebuild_tree,
    random_insert,
);

criterion_main!(quadtree_benches);
