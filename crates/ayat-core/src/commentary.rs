//! Fixed pool of commentary fragments shown under every lookup.

use rand::Rng;

pub const DISCLAIMER: &str = "ملاحظة: هذا نص تجريبي للمعاينة";

const FRAGMENTS: [&str; 4] = [
    "إحدى الإشكاليات الرئيسية في هذا الموضع تتعلق بالتوافق بين النص والسياق التاريخي الموثق. تشير الدراسات المقارنة إلى أن المفردات المستخدمة هنا كانت تحمل دلالات مختلفة في عصر ما قبل الإسلام، مما يغير المعنى المقصود تماماً عند إعادة قراءته في ضوء اللسانيات الحديثة.",
    "يلاحظ الناقد هنا وجود انقطاع في السياق السردي، وهو ما يفسره بعض الباحثين بكونه نتاجاً لعملية جمع وتدوين لاحقة. هذا الانتقال المفاجئ في الموضوع يثير تساؤلات حول وحدة النص وبنيته الأصلية.",
    "من المنظور الأخلاقي المعاصر، يطرح هذا الحكم إشكاليات عدة، خاصة عند محاولة تطبيقه خارج إطاره الزمني. الجمود على ظاهر النص هنا قد يؤدي إلى تعارض صريح مع مبادئ حقوق الإنسان العالمية المتفق عليها اليوم.",
    "هناك تباين واضح بين التفسير التقليدي وما تظهره الاكتشافات العلمية الحديثة. محاولات التوفيق (الإعجاز العلمي) هنا تبدو متكلفة وتفتقر إلى المنهجية العلمية الرصينة، حيث يتم ليّ عنق النص ليوافق حقيقة مكتشفة حديثاً.",
];

/// One selected fragment plus the fixed disclaimer note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commentary {
    pub fragment: &'static str,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CommentaryPool {
    fragments: &'static [&'static str],
}

impl CommentaryPool {
    pub fn builtin() -> Self {
        Self { fragments: &FRAGMENTS }
    }

    pub fn fragments(&self) -> &'static [&'static str] {
        self.fragments
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.iter().any(|f| *f == fragment)
    }

    /// Uniform pick. Earlier picks are not remembered, so repeats happen.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Commentary {
        let idx = rng.gen_range(0..self.fragments.len());
        Commentary {
            fragment: self.fragments[idx],
            disclaimer: DISCLAIMER,
        }
    }
}

impl Default for CommentaryPool {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_comes_from_pool() {
        let pool = CommentaryPool::builtin();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let commentary = pool.pick(&mut rng);
            assert!(pool.contains(commentary.fragment));
            assert_eq!(commentary.disclaimer, DISCLAIMER);
        }
    }

    #[test]
    fn test_pick_reaches_every_fragment() {
        let pool = CommentaryPool::builtin();
        let mut rng = SmallRng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..500).map(|_| pool.pick(&mut rng).fragment).collect();
        assert_eq!(seen.len(), pool.fragments().len());
    }
}
