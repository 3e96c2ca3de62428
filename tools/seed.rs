use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use yatube_store::storage::rocksdb_store::RocksDbStorage;
use yatube_store::{
    BlogStorage, Group, NewComment, NewGroup, NewMessage, NewPost, NewUser, Post, User,
};

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Populate a Yatube store with demo data", long_about = None)]
struct Args {
    /// Database directory
    #[arg(short, long, default_value = "./data/yatube")]
    db_path: PathBuf,

    /// Key namespace inside the database
    #[arg(long, default_value = "yatube")]
    namespace: String,

    /// Number of users
    #[arg(short, long, default_value_t = 20)]
    users: usize,

    /// Number of groups
    #[arg(short, long, default_value_t = 4)]
    groups: usize,

    /// Posts written by each user
    #[arg(short, long, default_value_t = 5)]
    posts_per_user: usize,

    /// Authors followed by each user
    #[arg(short, long, default_value_t = 3)]
    follows_per_user: usize,

    /// Comments in total
    #[arg(short, long, default_value_t = 40)]
    comments: usize,

    /// Direct messages in total
    #[arg(short, long, default_value_t = 30)]
    messages: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const TOPICS: [&str; 6] = ["Travel", "Books", "Cooking", "Music", "Science", "Cats"];
const PHRASES: [&str; 8] = [
    "Started a new chapter today.",
    "Anyone else up this early?",
    "Found a great place around the corner.",
    "Three things I learned this week.",
    "Finally finished the project.",
    "Recommendations welcome!",
    "Short note before I forget.",
    "Photos coming soon.",
];

struct Seeder {
    rng: StdRng,
    storage: RocksDbStorage,
}

impl Seeder {
    fn new(storage: RocksDbStorage, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            storage,
        }
    }

    fn phrase(&mut self) -> String {
        PHRASES[self.rng.gen_range(0..PHRASES.len())].to_string()
    }

    async fn seed_users(&mut self, count: usize) -> Result<Vec<User>> {
        let mut users = Vec::with_capacity(count);
        for i in 0..count {
            let username = format!("user{}", i);
            let user = match self.storage.get_user_by_username(&username).await? {
                Some(existing) => existing,
                None => {
                    self.storage
                        .create_user(NewUser {
                            username: username.clone(),
                            first_name: format!("First{}", i),
                            last_name: format!("Last{}", i),
                            email: format!("{}@example.com", username),
                        })
                        .await?
                }
            };
            users.push(user);
        }
        Ok(users)
    }

    async fn seed_groups(&mut self, count: usize) -> Result<Vec<Group>> {
        let mut groups = Vec::with_capacity(count);
        for i in 0..count {
            let topic = TOPICS[i % TOPICS.len()];
            let slug = format!("{}-{}", topic.to_lowercase(), i);
            let group = match self.storage.get_group_by_slug(&slug).await? {
                Some(existing) => existing,
                None => {
                    self.storage
                        .create_group(NewGroup {
                            title: topic.to_string(),
                            slug,
                            description: format!("Everything about {}", topic.to_lowercase()),
                        })
                        .await?
                }
            };
            groups.push(group);
        }
        Ok(groups)
    }

    async fn seed_posts(&mut self, users: &[User], groups: &[Group], per_user: usize) -> Result<Vec<Post>> {
        let mut posts = Vec::with_capacity(users.len() * per_user);
        for user in users {
            for _ in 0..per_user {
                // Roughly half of the posts go into a group
                let group = if !groups.is_empty() && self.rng.gen_bool(0.5) {
                    Some(groups[self.rng.gen_range(0..groups.len())].id)
                } else {
                    None
                };
                let text = self.phrase();
                let post = self
                    .storage
                    .create_post(NewPost {
                        text,
                        author: user.id,
                        group,
                        image: None,
                    })
                    .await?;
                posts.push(post);
            }
        }
        Ok(posts)
    }

    async fn seed_follows(&mut self, users: &[User], per_user: usize) -> Result<usize> {
        let mut created = 0;
        for user in users {
            let authors: Vec<&User> = users
                .choose_multiple(&mut self.rng, per_user + 1)
                .filter(|author| author.id != user.id)
                .take(per_user)
                .collect();
            for author in authors {
                if self.storage.follow(user.id, author.id).await? {
                    created += 1;
                }
            }
        }
        Ok(created)
    }

    async fn seed_comments(&mut self, users: &[User], posts: &[Post], count: usize) -> Result<usize> {
        if users.is_empty() || posts.is_empty() {
            return Ok(0);
        }
        for _ in 0..count {
            let post = &posts[self.rng.gen_range(0..posts.len())];
            let author = &users[self.rng.gen_range(0..users.len())];
            let text = self.phrase();
            self.storage
                .create_comment(NewComment {
                    post: post.id,
                    author: author.id,
                    text,
                })
                .await?;
        }
        Ok(count)
    }

    async fn seed_messages(&mut self, users: &[User], count: usize) -> Result<usize> {
        if users.len() < 2 {
            return Ok(0);
        }
        for _ in 0..count {
            let pair: Vec<&User> = users.choose_multiple(&mut self.rng, 2).collect();
            let text = self.phrase();
            self.storage
                .create_message(NewMessage {
                    text,
                    author: pair[0].id,
                    user: pair[1].id,
                    image: None,
                })
                .await?;
        }
        Ok(count)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    std::fs::create_dir_all(&args.db_path).context("Failed to create database directory")?;

    let storage = RocksDbStorage::new(&args.db_path, args.namespace.clone())
        .context("Failed to open store")?;
    let mut seeder = Seeder::new(storage, args.seed);

    let users = seeder.seed_users(args.users).await?;
    let groups = seeder.seed_groups(args.groups).await?;
    let posts = seeder.seed_posts(&users, &groups, args.posts_per_user).await?;
    let follows = seeder.seed_follows(&users, args.follows_per_user).await?;
    let comments = seeder.seed_comments(&users, &posts, args.comments).await?;
    let messages = seeder.seed_messages(&users, args.messages).await?;

    tracing::info!(
        db_path = %args.db_path.display(),
        namespace = %args.namespace,
        users = users.len(),
        groups = groups.len(),
        posts = posts.len(),
        follows,
        comments,
        messages,
        "seeding complete"
    );

    Ok(())
}
